//! Wire shapes for the Strata client
//!
//! This crate owns the byte- and JSON-level formats that cross the transport
//! boundary. It does no I/O.
//!
//! - [`json`]: property bags as REST JSON objects
//! - [`batch`]: the gRPC batch-property message
//! - [`vector`]: binary single- and multi-vector encoding
//!
//! ## Vector Framing
//!
//! | Shape | Layout |
//! |-------|--------|
//! | single | `elem*` |
//! | multi | `u16le width` then `elem*` row-major |
//!
//! ## Examples
//!
//! ```
//! use strata_client_wire::vector::{decode_multi, encode_multi};
//!
//! let rows = vec![vec![1.0f32, 2.0], vec![3.0, 4.0]];
//! let bytes = encode_multi(&rows).unwrap();
//! assert_eq!(&bytes[..2], &2u16.to_le_bytes());
//! assert_eq!(decode_multi::<f32>(&bytes).unwrap(), rows);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod json;
pub mod vector;

pub use batch::{
    ArrayKind, BatchProperties, BooleanArrayProperties, IntArrayProperties, NumberArrayProperties,
    ObjectArrayProperties, ReferenceArrayProperties, TextArrayProperties,
};
pub use json::{decode_json, encode_json, from_json_value, to_json_value, JsonError};
pub use vector::{ElementKind, Shape, VectorData, VectorElement, VectorValue};
