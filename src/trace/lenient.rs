//! Field-level decoders that never fail the surrounding record.
//!
//! A finished trace is static input: a field with an unexpected shape
//! degrades to its default and decoding continues with the rest of the
//! record.

use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode `T`, or `T::default()` if the value has the wrong shape.
/// An explicit `null` is the default without a warning.
pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(from_value_or_default(value))
}

/// Decode a list element by element, dropping elements that don't decode.
/// A non-array value yields `None`.
pub fn seq<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let values = match Value::deserialize(deserializer)? {
        Value::Array(values) => values,
        Value::Null => return Ok(None),
        other => {
            warn!("Expected a list, found {}; treating as absent", kind(&other));
            return Ok(None);
        }
    };

    let mut decoded = Vec::with_capacity(values.len());
    for (i, value) in values.into_iter().enumerate() {
        match serde_json::from_value(value) {
            Ok(v) => decoded.push(v),
            Err(e) => warn!("Skipping malformed record #{}: {}", i, e),
        }
    }
    Ok(Some(decoded))
}

fn from_value_or_default<T>(value: Value) -> T
where
    T: DeserializeOwned + Default,
{
    if value.is_null() {
        return T::default();
    }
    match serde_json::from_value(value) {
        Ok(v) => v,
        Err(e) => {
            warn!("Malformed field replaced by default: {}", e);
            T::default()
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
