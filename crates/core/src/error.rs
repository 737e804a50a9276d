//! Error taxonomy for marshalling
//!
//! | Error | Raised by | Recovery |
//! |-------|-----------|----------|
//! | `UnsupportedType` | serializer, vector codec | fatal to the call |
//! | `TruncatedVector` / `RaggedMatrix` / `RowTooWide` / `EmptyRows` | vector codec | fatal to the call |
//! | `ConversionError` | deserializer | field skipped (lenient) or surfaced (strict) |
//! | `UnknownField` / `FieldTypeMismatch` | [`Instance::set`](crate::Instance::set) | fatal to the call |
//!
//! Cycle truncation is not an error.

use thiserror::Error;

/// Result alias for marshalling operations
pub type Result<T> = std::result::Result<T, MarshalError>;

/// Errors surfaced by serialization, encoding and object construction
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MarshalError {
    /// A field, array element, or vector element kind has no wire mapping
    #[error("unsupported type '{type_name}'{}", .field.as_ref().map(|f| format!(" for property '{}'", f)).unwrap_or_default())]
    UnsupportedType {
        /// Offending field, when the failure is tied to one
        field: Option<String>,
        /// Name of the kind with no mapping
        type_name: String,
    },

    /// Vector buffer length is not a whole number of elements
    #[error("truncated vector: {len} bytes is not a multiple of element size {element_size}")]
    TruncatedVector {
        /// Buffer length in bytes
        len: usize,
        /// Element width in bytes
        element_size: usize,
    },

    /// Multi-vector rows have different lengths
    #[error("ragged multi-vector: row {row} has {actual} columns, expected {expected}")]
    RaggedMatrix {
        /// Index of the first offending row
        row: usize,
        /// Width of row 0
        expected: usize,
        /// Width of the offending row
        actual: usize,
    },

    /// Multi-vector row width does not fit the 2-byte header
    #[error("multi-vector row width {width} exceeds {}", u16::MAX)]
    RowTooWide {
        /// Requested column count
        width: usize,
    },

    /// Multi-vector rows have no columns; the header cannot carry the row count
    #[error("multi-vector has {rows} rows of width 0")]
    EmptyRows {
        /// Number of empty rows
        rows: usize,
    },

    /// A field value could not be coerced (strict mode only)
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// Assignment to a field the descriptor does not declare
    #[error("type '{type_name}' has no field '{field}'")]
    UnknownField {
        /// Descriptor name
        type_name: String,
        /// Requested field
        field: String,
    },

    /// Assignment of a value whose kind the field does not accept
    #[error("field '{field}' expects {expected}, got {actual}")]
    FieldTypeMismatch {
        /// Field name
        field: String,
        /// Declared kind
        expected: String,
        /// Kind of the rejected value
        actual: &'static str,
    },

    /// REST payload could not be encoded or decoded
    #[error("json error: {0}")]
    Json(String),
}

impl MarshalError {
    /// Build an `UnsupportedType` error tied to a field
    pub fn unsupported_field(field: impl Into<String>, type_name: impl Into<String>) -> Self {
        MarshalError::UnsupportedType {
            field: Some(field.into()),
            type_name: type_name.into(),
        }
    }

    /// Build an `UnsupportedType` error for a bare kind (vector elements)
    pub fn unsupported_kind(type_name: impl Into<String>) -> Self {
        MarshalError::UnsupportedType {
            field: None,
            type_name: type_name.into(),
        }
    }

    /// Check if this is an unsupported-type error
    pub fn is_unsupported_type(&self) -> bool {
        matches!(self, MarshalError::UnsupportedType { .. })
    }
}

/// Per-field coercion failure during deserialization
#[derive(Debug, Clone, Error, PartialEq)]
#[error("cannot convert {actual} to {expected} for field '{field}': {reason}")]
pub struct ConversionError {
    /// Target field (dotted path for nested objects)
    pub field: String,
    /// Declared kind of the target
    pub expected: String,
    /// Wire type of the source value
    pub actual: &'static str,
    /// What went wrong
    pub reason: String,
}

impl ConversionError {
    /// Create a conversion error for `field`
    pub fn new(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        ConversionError {
            field: field.into(),
            expected: expected.into(),
            actual,
            reason: reason.into(),
        }
    }
}
