//! # Persisted Cart Format
//!
//! Versioned layout of the cart blob plus migrate-on-read for older layouts.
//!
//! ## Schema History
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Blob Versions                                 │
//! │                                                                         │
//! │  v1 (unversioned)                                                      │
//! │    [ { id, title, category, price: 65, ..., quantity: 2 }, ... ]       │
//! │    price in dollars, no envelope                                       │
//! │       │                                                                 │
//! │       │  upgrade(): price × 100 (rounded), wrap in envelope            │
//! │       ▼                                                                 │
//! │  v2 (current)                                                          │
//! │    { "version": 2, "savedAt": "<RFC3339>",                             │
//! │      "items": [ { ..., price: 6500, quantity: 2, addedAt } ] }         │
//! │                                                                         │
//! │  v3+  → UnsupportedSchema (written by a newer build; never guessed at) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Adding a Version
//!
//! 1. Bump [`CART_SCHEMA_VERSION`]
//! 2. Add a step to [`upgrade`] that rewrites the previous layout
//! 3. **NEVER** change how an existing version is read

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crafts_core::CartLine;

use crate::error::{StoreError, StoreResult};

/// Version written by this build.
pub const CART_SCHEMA_VERSION: u32 = 2;

/// The v2 envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartDocument {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub items: Vec<CartLine>,
}

impl CartDocument {
    /// Wraps lines in a current-version envelope stamped now.
    pub fn new(items: Vec<CartLine>) -> Self {
        CartDocument {
            version: CART_SCHEMA_VERSION,
            saved_at: Utc::now(),
            items,
        }
    }
}

/// Reads a stored value of any known version as a current document.
///
/// `key` is used only for error context.
pub fn upgrade(key: &str, value: Value) -> StoreResult<CartDocument> {
    match value {
        Value::Array(items) => {
            info!(key = %key, lines = items.len(), "Migrating cart blob v1 → v2");
            let items = items
                .into_iter()
                .map(|item| migrate_v1_line(key, item))
                .collect::<StoreResult<Vec<_>>>()?;
            decode_v2(key, json_envelope(items))
        }

        Value::Object(ref fields) => {
            let version = fields
                .get("version")
                .and_then(Value::as_u64)
                .ok_or_else(|| StoreError::corrupt(key, "missing schema version"))?;
            let version = u32::try_from(version).unwrap_or(u32::MAX);

            match version {
                CART_SCHEMA_VERSION => decode_v2(key, value),
                v if v > CART_SCHEMA_VERSION => Err(StoreError::UnsupportedSchema {
                    found: v,
                    supported: CART_SCHEMA_VERSION,
                }),
                v => Err(StoreError::corrupt(
                    key,
                    format!("unknown schema version {}", v),
                )),
            }
        }

        other => Err(StoreError::corrupt(
            key,
            format!("expected array or object, found {}", kind(&other)),
        )),
    }
}

/// v1 stored prices as (possibly fractional) dollars.
fn migrate_v1_line(key: &str, item: Value) -> StoreResult<Value> {
    let Value::Object(mut fields) = item else {
        return Err(StoreError::corrupt(key, "v1 cart line is not an object"));
    };

    let dollars = fields
        .get("price")
        .and_then(Value::as_f64)
        .ok_or_else(|| StoreError::corrupt(key, "v1 cart line has no numeric price"))?;

    let cents = (dollars * 100.0).round() as i64;
    fields.insert("price".to_string(), Value::from(cents));
    Ok(Value::Object(fields))
}

fn json_envelope(items: Vec<Value>) -> Value {
    let mut envelope = Map::new();
    envelope.insert("version".to_string(), Value::from(CART_SCHEMA_VERSION));
    envelope.insert("savedAt".to_string(), Value::from(Utc::now().to_rfc3339()));
    envelope.insert("items".to_string(), Value::Array(items));
    Value::Object(envelope)
}

fn decode_v2(key: &str, value: Value) -> StoreResult<CartDocument> {
    serde_json::from_value(value).map_err(|e| StoreError::corrupt(key, e.to_string()))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn v1_line(id: u32, price: Value, quantity: i64) -> Value {
        json!({
            "id": id,
            "title": "Classic Dodgers Table Lamp",
            "category": "lamps",
            "price": price,
            "description": "Handcrafted",
            "image": "./assets/images/products/lamp-01.jpg",
            "featured": true,
            "quantity": quantity,
        })
    }

    #[test]
    fn test_v1_array_migrates_prices() {
        let v1 = json!([v1_line(1, json!(65), 2), v1_line(2, json!(12.5), 1)]);
        let doc = upgrade("cart", v1).unwrap();

        assert_eq!(doc.version, CART_SCHEMA_VERSION);
        assert_eq!(doc.items.len(), 2);
        assert_eq!(doc.items[0].product.price.cents(), 6500);
        assert_eq!(doc.items[0].quantity, 2);
        assert_eq!(doc.items[1].product.price.cents(), 1250);
    }

    #[test]
    fn test_v2_reads_as_is() {
        let written = serde_json::to_value(CartDocument::new(Vec::new())).unwrap();
        assert_eq!(written["version"], 2);
        assert!(written.get("savedAt").is_some());

        let doc = upgrade("cart", written).unwrap();
        assert!(doc.items.is_empty());
    }

    #[test]
    fn test_newer_version_is_unsupported() {
        let err = upgrade("cart", json!({"version": 3, "items": []})).unwrap_err();
        assert!(matches!(
            err,
            StoreError::UnsupportedSchema {
                found: 3,
                supported: 2
            }
        ));
    }

    #[test]
    fn test_garbage_is_corrupt() {
        for value in [json!("hello"), json!({"items": []}), json!([1, 2]), json!({"version": 1})] {
            assert!(
                matches!(upgrade("cart", value.clone()), Err(StoreError::CorruptRecord { .. })),
                "{} should be corrupt",
                value
            );
        }
    }
}
