use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

pub const NORMAL_SHIPPING_AMOUNT: i64 = 6320;
pub const FAST_SHIPPING_AMOUNT: i64 = 7810;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShippingType {
    Normal,
    Fast,
}

impl ShippingType {
    /// Only the exact string `"fast"` selects fast shipping.
    pub fn from_flag(flag: Option<&Value>) -> Self {
        match flag.and_then(Value::as_str) {
            Some("fast") => ShippingType::Fast,
            _ => ShippingType::Normal,
        }
    }

    /// Order total in centavos.
    pub fn amount(self) -> i64 {
        match self {
            ShippingType::Normal => NORMAL_SHIPPING_AMOUNT,
            ShippingType::Fast => FAST_SHIPPING_AMOUNT,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShippingType::Normal => "normal",
            ShippingType::Fast => "fast",
        }
    }
}

/// Opaque key/value bag attached to the gateway transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, Value>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absent values are skipped so the gateway only sees what was submitted.
    pub fn insert<V: Into<Value>>(&mut self, key: &str, value: Option<V>) {
        if let Some(value) = value {
            self.0.insert(key.to_string(), value.into());
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn only_fast_flag_selects_fast_amount() {
        assert_eq!(ShippingType::from_flag(Some(&json!("fast"))).amount(), FAST_SHIPPING_AMOUNT);

        for flag in [json!("normal"), json!("FAST"), json!(""), json!(1), json!(null), json!({"fast": true})] {
            assert_eq!(
                ShippingType::from_flag(Some(&flag)).amount(),
                NORMAL_SHIPPING_AMOUNT,
                "flag {flag}"
            );
        }
        assert_eq!(ShippingType::from_flag(None), ShippingType::Normal);
    }

    #[test]
    fn strips_everything_but_digits() {
        assert_eq!(digits_only("123.456.789-00"), "12345678900");
        assert_eq!(digits_only("(11) 99999-0000"), "11999990000");
        assert_eq!(digits_only("+55 ١٢٣"), "55");
        assert_eq!(digits_only("abc"), "");
    }

    #[test]
    fn metadata_skips_absent_values() {
        let mut metadata = Metadata::new();
        metadata.insert("city", Some("São Paulo"));
        metadata.insert("utm_term", None::<String>);
        metadata.insert("shipping_type", Some(json!("fast")));

        assert_eq!(metadata.len(), 2);
        assert!(metadata.get("utm_term").is_none());
        assert_eq!(
            metadata.to_json_string().unwrap(),
            r#"{"city":"São Paulo","shipping_type":"fast"}"#
        );
    }
}
