//! Decoding of the ERP payments widget summary.
//!
//! The ERP stores, per invoice, a JSON document describing the payments
//! reconciled against it:
//!
//! ```json
//! {"title": "Less Payment", "outstanding": false,
//!  "content": [{"journal_name": "Bank", "amount": 121.0, "date": "2024-06-20", "ref": "BNK1/2024/0007"}]}
//! ```
//!
//! An invoice without payments stores `false` instead of an object.

use rust_decimal::Decimal;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Decoded payment summary of one invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentWidget {
    /// Payments in the order the ERP listed them.
    pub content: Vec<PaymentEntry>,
}

/// One payment reconciled against an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentEntry {
    pub journal_name: String,
    #[serde(deserialize_with = "de_amount")]
    pub amount: Decimal,
    /// Payment date as rendered by the ERP.
    #[serde(default, deserialize_with = "de_text")]
    pub date: String,
    #[serde(rename = "ref", default, deserialize_with = "de_optional_text")]
    pub reference: Option<String>,
}

impl PaymentWidget {
    /// Parse a widget summary.
    ///
    /// Returns `Ok(None)` when the invoice has no payments (`false`, `null`,
    /// empty text or an empty object). Any other non-object value, or an
    /// object without a `content` list, is an error.
    pub fn parse(raw: &str) -> Result<Option<Self>, serde_json::Error> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }

        let value: Value = serde_json::from_str(raw)?;
        let no_payments = match &value {
            Value::Null | Value::Bool(false) => true,
            Value::Object(map) => map.is_empty(),
            _ => false,
        };
        if no_payments {
            return Ok(None);
        }
        if !value.is_object() {
            return Err(de::Error::custom(format!(
                "expected an object, found `{value}`"
            )));
        }

        serde_json::from_value(value).map(Some)
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(serde_json::Number),
    Text(String),
}

fn de_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    let text = match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(n) => n.to_string(),
        RawAmount::Text(s) => s,
    };
    text.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|e| de::Error::custom(format!("invalid amount `{text}`: {e}")))
}

/// The ERP renders unset text fields as `false`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    Text(String),
    Flag(bool),
}

fn de_optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Option::<RawText>::deserialize(deserializer)? {
        Some(RawText::Text(s)) => Some(s),
        Some(RawText::Flag(_)) | None => None,
    })
}

fn de_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    de_optional_text(deserializer).map(Option::unwrap_or_default)
}
