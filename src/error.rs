//! Unified error type for the client marshalling API.
//!
//! Wraps the errors of the internal crates and presents one stable enum.

use strata_client_core::{ConversionError, MarshalError};
use thiserror::Error;

/// All marshalling errors.
#[derive(Debug, Error)]
pub enum Error {
    /// A field, array element, or vector kind has no wire mapping
    #[error("unsupported type '{type_name}'{}", .field.as_ref().map(|f| format!(" for property '{}'", f)).unwrap_or_default())]
    UnsupportedType {
        /// Offending field, if any
        field: Option<String>,
        /// Kind with no mapping
        type_name: String,
    },

    /// A field value could not be converted (strict mode)
    #[error(transparent)]
    Conversion(ConversionError),

    /// Vector bytes are malformed or a matrix is not rectangular
    #[error("vector error: {0}")]
    Vector(String),

    /// Field assignment rejected by the schema
    #[error("invalid object: {0}")]
    InvalidObject(String),

    /// REST payload could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for marshalling operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this is an unsupported-type error.
    pub fn is_unsupported_type(&self) -> bool {
        matches!(self, Error::UnsupportedType { .. })
    }

    /// Check if this is a conversion error.
    pub fn is_conversion(&self) -> bool {
        matches!(self, Error::Conversion(_))
    }

    /// Check if this is a vector framing error.
    pub fn is_vector(&self) -> bool {
        matches!(self, Error::Vector(_))
    }
}

// Convert from internal marshalling errors
impl From<MarshalError> for Error {
    fn from(e: MarshalError) -> Self {
        match e {
            MarshalError::UnsupportedType { field, type_name } => {
                Error::UnsupportedType { field, type_name }
            }
            MarshalError::Conversion(c) => Error::Conversion(c),
            e @ (MarshalError::TruncatedVector { .. }
            | MarshalError::RaggedMatrix { .. }
            | MarshalError::RowTooWide { .. }
            | MarshalError::EmptyRows { .. }) => Error::Vector(e.to_string()),
            e @ (MarshalError::UnknownField { .. } | MarshalError::FieldTypeMismatch { .. }) => {
                Error::InvalidObject(e.to_string())
            }
            MarshalError::Json(msg) => Error::Serialization(msg),
        }
    }
}

impl From<ConversionError> for Error {
    fn from(e: ConversionError) -> Self {
        Error::Conversion(e)
    }
}

// Convert from REST wire errors
impl From<strata_client_wire::JsonError> for Error {
    fn from(e: strata_client_wire::JsonError) -> Self {
        Error::Serialization(e.to_string())
    }
}
