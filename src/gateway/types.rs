//! Wire types for the BlackCat transactions API.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const PIX_EXPIRES_IN_SECONDS: u32 = 900;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub amount: i64,
    pub currency: String,
    pub payment_method: String,
    pub customer: Customer,
    pub items: Vec<Item>,
    pub pix: PixOptions,
    /// JSON-encoded metadata, forwarded as an opaque string.
    pub metadata: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,
    pub document: Document,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Document {
    #[serde(rename = "type")]
    pub kind: String,
    pub number: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub title: String,
    pub unit_price: i64,
    pub quantity: u32,
    pub tangible: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PixOptions {
    pub expires_in_seconds: u32,
}

/// Response body of both create and lookup. Every field is optional and read
/// leniently because error bodies share the same shape minus the id, and their
/// field types are not stable across gateway versions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayTransaction {
    #[serde(default, deserialize_with = "opaque_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient_pix")]
    pub pix: Option<PixData>,
    #[serde(default, deserialize_with = "string_only")]
    pub pix_qr_code: Option<String>,
    #[serde(default, deserialize_with = "string_only")]
    pub pix_copy_paste: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub paid_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PixData {
    #[serde(default, deserialize_with = "string_only")]
    pub qrcode: Option<String>,
    #[serde(rename = "qrCode", default, deserialize_with = "string_only")]
    pub qr_code: Option<String>,
    #[serde(rename = "copyPaste", default, deserialize_with = "string_only")]
    pub copy_paste: Option<String>,
}

/// Accepts the id as a string or a number; anything else reads as absent.
fn opaque_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Strings as-is, `null` as absent, any other value rendered as JSON text.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    })
}

fn string_only<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// A `pix` member that is not an object reads as absent.
fn lenient_pix<'de, D>(deserializer: D) -> Result<Option<PixData>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
        _ => None,
    })
}
