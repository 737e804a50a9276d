//! JSON decoding for property bags
//!
//! Numbers that fit `i64` decode to `Value::Int`; everything else numeric
//! decodes to `Value::Float`. Larger unsigned integers fall back to `Float`.

use super::JsonError;
use strata_client_core::{PropertyBag, Value};

/// Decode a JSON object into a bag
pub fn decode_json(json: &str) -> Result<PropertyBag, JsonError> {
    let trimmed = json.trim();
    if trimmed.is_empty() {
        return Err(JsonError::InvalidJson("unexpected end of input".to_string()));
    }
    let value: serde_json::Value =
        serde_json::from_str(trimmed).map_err(|e| JsonError::InvalidJson(e.to_string()))?;
    from_json_value(value)
}

/// Convert a `serde_json` object into a bag
pub fn from_json_value(value: serde_json::Value) -> Result<PropertyBag, JsonError> {
    match value {
        serde_json::Value::Object(map) => Ok(decode_map(map)),
        other => Err(JsonError::NotAnObject(json_type_name(&other))),
    }
}

fn decode_map(map: serde_json::Map<String, serde_json::Value>) -> PropertyBag {
    let mut bag = PropertyBag::with_capacity(map.len());
    for (key, value) in map {
        bag.insert(key, decode_value(value));
    }
    bag
}

fn decode_value(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            // as_f64 only fails for arbitrary-precision numbers, which are disabled
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => {
            Value::Array(items.into_iter().map(decode_value).collect())
        }
        serde_json::Value::Object(map) => Value::Object(decode_map(map)),
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "Null",
        serde_json::Value::Bool(_) => "Bool",
        serde_json::Value::Number(_) => "Number",
        serde_json::Value::String(_) => "String",
        serde_json::Value::Array(_) => "Array",
        serde_json::Value::Object(_) => "Object",
    }
}
