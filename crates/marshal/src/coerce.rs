//! Scalar coercion table
//!
//! The last step of deserialization: a wire scalar that did not match its
//! target exactly is converted through one table indexed by
//! `(source kind, target kind)`.
//!
//! | Source | Target | Rule |
//! |--------|--------|------|
//! | `Int` | any integer | range-checked |
//! | `Float` | any integer | must be integral and in range |
//! | `String` | any integer | parsed, then range-checked |
//! | `String` | `UInt64` | parsed as `u64`, so values above `i64::MAX` survive |
//! | `Int` / `Float` / `String` | `Float32` / `Float64` | widened / narrowed / parsed |
//! | `String` / `Int` | `Bool` | `"true"`/`"false"` (any case); non-zero |
//! | any scalar | `Text` | display form |
//! | `String` | `Date` | RFC 3339, converted to UTC |
//! | `String` | `Uuid`, `Uri` | parsed |
//! | `String` | `Blob` | standard base64 |
//!
//! Every other pair fails. Failures carry a short reason; the caller attaches
//! the field path.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use strata_client_core::{FieldKind, FieldValue, Value};
use url::Url;
use uuid::Uuid;

/// Why a scalar could not be converted
pub type CoerceResult = std::result::Result<FieldValue, String>;

/// Convert a wire scalar to a scalar field kind
pub fn coerce_scalar(value: &Value, kind: &FieldKind) -> CoerceResult {
    match (value, kind) {
        (Value::Bool(b), FieldKind::Bool) => Ok(FieldValue::Bool(*b)),
        (Value::Int(i), FieldKind::Bool) => Ok(FieldValue::Bool(*i != 0)),
        (Value::String(s), FieldKind::Bool) => parse_bool(s).map(FieldValue::Bool),

        (Value::Int(i), k) if is_integer(k) => narrow_int(*i, k),
        (Value::Float(f), k) if is_integer(k) => narrow_int(integral(*f)?, k),
        (Value::String(s), FieldKind::UInt64) => s
            .trim()
            .parse::<u64>()
            .map(FieldValue::U64)
            .map_err(|e| format!("'{}': {}", s, e)),
        (Value::String(s), k) if is_integer(k) => {
            let i = s.trim().parse::<i64>().map_err(|e| format!("'{}': {}", s, e))?;
            narrow_int(i, k)
        }

        (Value::Int(i), FieldKind::Float64) => Ok(FieldValue::F64(*i as f64)),
        (Value::Float(f), FieldKind::Float64) => Ok(FieldValue::F64(*f)),
        (Value::String(s), FieldKind::Float64) => parse_float(s).map(FieldValue::F64),
        (Value::Int(i), FieldKind::Float32) => Ok(FieldValue::F32(*i as f32)),
        (Value::Float(f), FieldKind::Float32) => narrow_f32(*f),
        (Value::String(s), FieldKind::Float32) => narrow_f32(parse_float(s)?),

        (Value::String(s), FieldKind::Text) => Ok(FieldValue::Text(s.clone())),
        (Value::Bool(b), FieldKind::Text) => Ok(FieldValue::Text(b.to_string())),
        (Value::Int(i), FieldKind::Text) => Ok(FieldValue::Text(i.to_string())),
        (Value::Float(f), FieldKind::Text) => Ok(FieldValue::Text(f.to_string())),

        (Value::String(s), FieldKind::Date) => DateTime::parse_from_rfc3339(s.trim())
            .map(|d| FieldValue::Date(d.with_timezone(&Utc)))
            .map_err(|e| format!("'{}': {}", s, e)),
        (Value::String(s), FieldKind::Uuid) => Uuid::parse_str(s.trim())
            .map(FieldValue::Uuid)
            .map_err(|e| format!("'{}': {}", s, e)),
        (Value::String(s), FieldKind::Uri) => Url::parse(s.trim())
            .map(FieldValue::Uri)
            .map_err(|e| format!("'{}': {}", s, e)),
        (Value::String(s), FieldKind::Blob) => STANDARD
            .decode(s.trim())
            .map(FieldValue::Blob)
            .map_err(|e| format!("invalid base64: {}", e)),

        (source, target) => Err(format!(
            "no conversion from {} to {}",
            source.type_name(),
            target.type_name()
        )),
    }
}

fn is_integer(kind: &FieldKind) -> bool {
    matches!(
        kind,
        FieldKind::Int8
            | FieldKind::Int16
            | FieldKind::Int32
            | FieldKind::Int64
            | FieldKind::UInt8
            | FieldKind::UInt16
            | FieldKind::UInt32
            | FieldKind::UInt64
    )
}

fn narrow_int(i: i64, kind: &FieldKind) -> CoerceResult {
    let out_of_range = |_| format!("{} is out of range for {}", i, kind.type_name());
    Ok(match kind {
        FieldKind::Int8 => FieldValue::I8(i8::try_from(i).map_err(out_of_range)?),
        FieldKind::Int16 => FieldValue::I16(i16::try_from(i).map_err(out_of_range)?),
        FieldKind::Int32 => FieldValue::I32(i32::try_from(i).map_err(out_of_range)?),
        FieldKind::Int64 => FieldValue::I64(i),
        FieldKind::UInt8 => FieldValue::U8(u8::try_from(i).map_err(out_of_range)?),
        FieldKind::UInt16 => FieldValue::U16(u16::try_from(i).map_err(out_of_range)?),
        FieldKind::UInt32 => FieldValue::U32(u32::try_from(i).map_err(out_of_range)?),
        FieldKind::UInt64 => FieldValue::U64(u64::try_from(i).map_err(out_of_range)?),
        other => return Err(format!("{} is not an integer kind", other.type_name())),
    })
}

/// Integral float to `i64`
pub(crate) fn integral(f: f64) -> std::result::Result<i64, String> {
    // 2^63 is exactly representable; anything at or above it overflows i64
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if !f.is_finite() || f.fract() != 0.0 {
        return Err(format!("{} is not an integral number", f));
    }
    if f < -LIMIT || f >= LIMIT {
        return Err(format!("{} is out of range for Int64", f));
    }
    Ok(f as i64)
}

fn narrow_f32(f: f64) -> CoerceResult {
    if f.is_finite() && f.abs() > f64::from(f32::MAX) {
        return Err(format!("{} is out of range for Float32", f));
    }
    Ok(FieldValue::F32(f as f32))
}

fn parse_float(s: &str) -> std::result::Result<f64, String> {
    s.trim().parse::<f64>().map_err(|e| format!("'{}': {}", s, e))
}

fn parse_bool(s: &str) -> std::result::Result<bool, String> {
    match s.trim() {
        t if t.eq_ignore_ascii_case("true") => Ok(true),
        t if t.eq_ignore_ascii_case("false") => Ok(false),
        _ => Err(format!("'{}' is not a boolean", s)),
    }
}
