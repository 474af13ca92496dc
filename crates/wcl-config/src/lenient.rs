//! Tolerant field decoders
//!
//! Used through `#[serde(deserialize_with = ...)]`. A field holding `null` or
//! a value of the wrong shape falls back to its default, and list elements
//! or map entries that fail to decode are dropped. Every fallback other than
//! `null` is logged with `tracing::warn!`.

use indexmap::IndexMap;
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

fn shape(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Decode each element on its own, dropping the ones that fail
pub(crate) fn decode_elements<T: DeserializeOwned>(raw: Vec<Value>) -> Vec<T> {
    let total = raw.len();
    let items: Vec<T> = raw
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect();
    if items.len() < total {
        tracing::warn!("Dropped {} malformed list element(s)", total - items.len());
    }
    items
}

/// Field decoder: `T::default()` on `null` or on a value that does not fit `T`
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(value).unwrap_or_else(|err| {
        tracing::warn!("Ignoring malformed field: {err}");
        T::default()
    }))
}

/// List decoder: element-wise; anything but an array decodes as empty
pub(crate) fn items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(raw) => decode_elements(raw),
        Value::Null => Vec::new(),
        other => {
            tracing::warn!("Expected an array, found {}", shape(&other));
            Vec::new()
        }
    })
}

/// Map decoder for id-to-number tables; non-numeric entries are skipped
pub(crate) fn numbers<'de, D>(deserializer: D) -> Result<IndexMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(raw) => raw
            .into_iter()
            .filter_map(|(key, value)| match value.as_f64() {
                Some(n) => Some((key, n)),
                None => {
                    tracing::warn!(
                        "Skipping \"{key}\": expected a number, found {}",
                        shape(&value)
                    );
                    None
                }
            })
            .collect(),
        Value::Null => IndexMap::new(),
        other => {
            tracing::warn!("Expected an object of numbers, found {}", shape(&other));
            IndexMap::new()
        }
    })
}
