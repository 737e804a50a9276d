//! REST wire encoding for property bags
//!
//! A [`PropertyBag`](strata_client_core::PropertyBag) maps one-to-one onto a
//! JSON object. Key order is the bag's insertion order.
//!
//! JSON has no NaN or infinities; bags carrying them are rejected at encode
//! time with the offending property path.

mod decode;
mod encode;

pub use decode::{decode_json, from_json_value};
pub use encode::{encode_json, to_json_value};

use strata_client_core::MarshalError;
use thiserror::Error;

/// REST encoding errors
#[derive(Debug, Error, PartialEq)]
pub enum JsonError {
    /// Invalid JSON syntax
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    /// Top-level document is not an object
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    /// A float with no JSON representation
    #[error("non-finite float at '{0}'")]
    NonFiniteFloat(String),
}

impl From<JsonError> for MarshalError {
    fn from(e: JsonError) -> Self {
        MarshalError::Json(e.to_string())
    }
}
