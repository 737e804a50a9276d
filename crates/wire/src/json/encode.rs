//! JSON encoding for property bags

use super::JsonError;
use serde_json::{Map, Number};
use strata_client_core::{PropertyBag, Value};

/// Encode a bag to a compact JSON string
pub fn encode_json(bag: &PropertyBag) -> Result<String, JsonError> {
    let value = to_json_value(bag)?;
    serde_json::to_string(&value).map_err(|e| JsonError::InvalidJson(e.to_string()))
}

/// Convert a bag to a `serde_json` object
pub fn to_json_value(bag: &PropertyBag) -> Result<serde_json::Value, JsonError> {
    encode_bag(bag, "")
}

fn encode_bag(bag: &PropertyBag, path: &str) -> Result<serde_json::Value, JsonError> {
    let mut map = Map::with_capacity(bag.len());
    for (key, value) in bag.iter() {
        let child = join(path, key);
        map.insert(key.to_string(), encode_value(value, &child)?);
    }
    Ok(serde_json::Value::Object(map))
}

fn encode_value(value: &Value, path: &str) -> Result<serde_json::Value, JsonError> {
    Ok(match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(i) => serde_json::Value::Number((*i).into()),
        Value::Float(f) => Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .ok_or_else(|| JsonError::NonFiniteFloat(path.to_string()))?,
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Array(items) => serde_json::Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| encode_value(item, &format!("{}[{}]", path, i)))
                .collect::<Result<_, _>>()?,
        ),
        Value::Object(bag) => encode_bag(bag, path)?,
    })
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}
