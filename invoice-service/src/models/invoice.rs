//! Invoice request and its validated form.

use super::LineItem;
use serde::Deserialize;
use serde_json::Value;

/// Body of `POST /generate` exactly as the client sent it.
///
/// Fields stay loosely typed so that validation can report every problem at
/// once instead of failing on the first type mismatch.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRequest {
    #[serde(default)]
    pub customer_name: Value,
    #[serde(default)]
    pub items: Value,
    #[serde(default)]
    pub invoice_number: Value,
    #[serde(default)]
    pub date: Value,
    #[serde(default)]
    pub currency: Value,
    #[serde(default)]
    pub locale: Value,
}

impl InvoiceRequest {
    /// Read any JSON body. Anything other than an object carries no fields.
    pub fn from_body(body: Value) -> Self {
        match body {
            Value::Object(_) => serde_json::from_value(body).unwrap_or_default(),
            _ => Self::default(),
        }
    }
}

/// Invoice data after validation: trimmed strings and valid items only.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedInvoice {
    pub customer_name: String,
    pub items: Vec<LineItem>,
    /// Empty when the client did not supply one.
    pub invoice_number: String,
    pub date: Option<String>,
    pub currency: String,
    pub locale: String,
}
