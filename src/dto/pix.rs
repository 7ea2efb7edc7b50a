use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Checkout form as posted by the storefront. Only `cpf`, `phone` and
/// `shipping_type` are read; everything else is forwarded as submitted.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreatePixRequest {
    #[serde(deserialize_with = "present")]
    pub name: Option<Value>,
    #[serde(deserialize_with = "present")]
    pub email: Option<Value>,
    #[serde(deserialize_with = "string_or_number")]
    pub cpf: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub phone: Option<String>,
    #[serde(flatten)]
    pub address: AddressFields,
    /// `"fast"` or anything else for normal shipping.
    #[serde(deserialize_with = "present")]
    #[schema(value_type = Option<String>, example = "normal")]
    pub shipping_type: Option<Value>,
    #[serde(flatten)]
    pub tracking: TrackingParams,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct AddressFields {
    #[serde(deserialize_with = "present")]
    pub cep: Option<Value>,
    #[serde(deserialize_with = "present")]
    pub street: Option<Value>,
    #[serde(deserialize_with = "present")]
    pub number: Option<Value>,
    #[serde(deserialize_with = "present")]
    pub complement: Option<Value>,
    #[serde(deserialize_with = "present")]
    pub neighborhood: Option<Value>,
    #[serde(deserialize_with = "present")]
    pub city: Option<Value>,
    #[serde(deserialize_with = "present")]
    pub state: Option<Value>,
}

/// Marketing attribution, forwarded untouched.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct TrackingParams {
    #[serde(deserialize_with = "present")]
    pub src: Option<Value>,
    #[serde(deserialize_with = "present")]
    pub sck: Option<Value>,
    #[serde(deserialize_with = "present")]
    pub utm_source: Option<Value>,
    #[serde(deserialize_with = "present")]
    pub utm_campaign: Option<Value>,
    #[serde(deserialize_with = "present")]
    pub utm_medium: Option<Value>,
    #[serde(deserialize_with = "present")]
    pub utm_content: Option<Value>,
    #[serde(deserialize_with = "present")]
    pub utm_term: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePixResponse {
    pub success: bool,
    pub transaction_id: String,
    pub pix_code: Option<String>,
    pub amount: i64,
    pub status: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CheckStatusRequest {
    #[serde(deserialize_with = "string_or_number")]
    pub transaction_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionStatus {
    pub transaction_id: Option<String>,
    pub status: Option<String>,
    pub paid_at: Option<String>,
}

/// A key that is present yields `Some`, even when its value is `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_a_full_checkout_form() {
        let body = r#"{
            "name": "Maria Silva",
            "email": "maria@example.com",
            "cpf": "123.456.789-00",
            "phone": "(11) 99999-0000",
            "cep": 1310100,
            "street": "Av. Paulista",
            "number": "1000",
            "city": "São Paulo",
            "state": "SP",
            "shipping_type": "fast",
            "utm_source": "instagram",
            "sck": "abc"
        }"#;
        let request: CreatePixRequest = serde_json::from_str(body).unwrap();

        assert_eq!(request.cpf.as_deref(), Some("123.456.789-00"));
        assert_eq!(request.name, Some(Value::from("Maria Silva")));
        assert_eq!(request.address.cep, Some(json!(1310100)));
        assert_eq!(request.address.number, Some(json!("1000")));
        assert!(request.address.complement.is_none());
        assert_eq!(request.shipping_type, Some(Value::from("fast")));
        assert_eq!(request.tracking.utm_source, Some(json!("instagram")));
        assert_eq!(request.tracking.sck, Some(json!("abc")));
        assert!(request.tracking.utm_term.is_none());
    }

    #[test]
    fn forwarded_fields_keep_their_json_type() {
        let body = r#"{
            "cpf": 12345678900,
            "phone": "11999990000",
            "complement": null,
            "utm_content": 12345,
            "src": ["a", "b"]
        }"#;
        let request: CreatePixRequest = serde_json::from_str(body).unwrap();

        assert_eq!(request.cpf.as_deref(), Some("12345678900"));
        assert_eq!(request.address.complement, Some(Value::Null));
        assert!(request.address.city.is_none());
        assert_eq!(request.tracking.utm_content, Some(json!(12345)));
        assert_eq!(request.tracking.src, Some(json!(["a", "b"])));
    }

    #[test]
    fn empty_object_is_a_valid_status_request() {
        let request: CheckStatusRequest = serde_json::from_str("{}").unwrap();
        assert!(request.transaction_id.is_none());

        let request: CheckStatusRequest = serde_json::from_str(r#"{"transaction_id": 42}"#).unwrap();
        assert_eq!(request.transaction_id.as_deref(), Some("42"));
    }
}
