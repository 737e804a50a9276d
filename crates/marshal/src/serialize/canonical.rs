//! Canonical wire forms of native values
//!
//! | Field value | Wire value |
//! |-------------|------------|
//! | integers | `Int` (widened to `i64`) |
//! | floats | `Float` (widened to `f64`) |
//! | date | ISO-8601 UTC string, `Z` suffix |
//! | UUID | lowercase hyphenated string |
//! | URI | string |
//! | geo | `{latitude, longitude}` |
//! | phone | `{input, defaultCountry}` |
//! | blob | standard base64 string |
//! | enum | variant name |

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, SecondsFormat, Utc};
use strata_client_core::{DynamicRecord, FieldValue, MarshalError, PropertyBag, Result, Value};

/// ISO-8601 UTC form, sub-second digits kept only when present
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Standard base64 with padding
pub fn encode_blob(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Text form of a value bound for a text array, if it has one
pub fn to_text(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Text(s) => Some(s.clone()),
        FieldValue::Date(d) => Some(format_date(d)),
        FieldValue::Uri(u) => Some(u.as_str().to_string()),
        FieldValue::Enum(e) => Some(e.name.clone()),
        _ => None,
    }
}

/// Convert a native value to its wire form
///
/// Lists convert element-wise. A nested typed object is not native and is
/// rejected; schema-less records convert to plain bags.
pub fn to_value(field: &str, value: &FieldValue) -> Result<Value> {
    Ok(match value {
        FieldValue::Null => Value::Null,
        FieldValue::Bool(b) => Value::Bool(*b),
        FieldValue::I8(_)
        | FieldValue::I16(_)
        | FieldValue::I32(_)
        | FieldValue::I64(_)
        | FieldValue::U8(_)
        | FieldValue::U16(_)
        | FieldValue::U32(_) => Value::Int(value.as_i64().unwrap_or_default()),
        FieldValue::U64(v) => Value::Int(
            i64::try_from(*v).map_err(|_| MarshalError::unsupported_field(field, "UInt64"))?,
        ),
        FieldValue::F32(f) => Value::Float(f64::from(*f)),
        FieldValue::F64(f) => Value::Float(*f),
        FieldValue::Text(s) => Value::String(s.clone()),
        FieldValue::Date(d) => Value::String(format_date(d)),
        FieldValue::Uuid(u) => Value::String(u.hyphenated().to_string()),
        FieldValue::Uri(u) => Value::String(u.as_str().to_string()),
        FieldValue::Geo(g) => Value::Object(g.to_bag()),
        FieldValue::Phone(p) => Value::Object(p.to_bag()),
        FieldValue::Blob(bytes) => Value::String(encode_blob(bytes)),
        FieldValue::Enum(e) => Value::String(e.name.clone()),
        FieldValue::List(items) => Value::Array(
            items
                .iter()
                .map(|item| to_value(field, item))
                .collect::<Result<Vec<_>>>()?,
        ),
        FieldValue::Dynamic(record) => Value::Object(record_to_bag(field, record)?),
        FieldValue::Object(obj) => {
            return Err(MarshalError::unsupported_field(
                field,
                format!("Object<{}>", obj.type_name()),
            ))
        }
    })
}

/// Convert a schema-less record to a bag, skipping null entries
pub fn record_to_bag(field: &str, record: &DynamicRecord) -> Result<PropertyBag> {
    let mut bag = PropertyBag::with_capacity(record.len());
    for (key, value) in record.iter() {
        if value.is_null() {
            continue;
        }
        bag.insert(key, to_value(field, value)?);
    }
    Ok(bag)
}
