//! # Strata Client
//!
//! Property marshalling and vector encoding for the Strata client.
//!
//! The client talks to the server in two shapes: a REST property map (a JSON
//! object per record) and a gRPC batch message that splits array-valued
//! properties by element kind. Vectors travel as raw little-endian bytes.
//! This crate converts caller objects to those shapes and back.
//!
//! ## Quick Start
//!
//! ```
//! use strata_client::prelude::*;
//!
//! let person = TypeDescriptor::builder("Person")
//!     .field("Name", FieldKind::Text)
//!     .field("Age", FieldKind::Int32)
//!     .field("Location", FieldKind::Geo)
//!     .build();
//!
//! let alice = Instance::new(&person)
//!     .with("Name", "Alice")?
//!     .with("Age", 30)?
//!     .with("Location", GeoCoordinate::new(1.0, 2.0))?;
//!
//! let marshaller = Marshaller::new();
//! let json = marshaller.to_json(&alice)?;
//! assert_eq!(
//!     json,
//!     r#"{"Name":"Alice","Age":30,"Location":{"latitude":1.0,"longitude":2.0}}"#
//! );
//! # Ok::<(), strata_client::Error>(())
//! ```
//!
//! ## Layers
//!
//! - [`strata_client_core`]: values, schemas, typed objects
//! - [`strata_client_wire`]: JSON, batch message and vector byte formats
//! - [`strata_client_marshal`]: serializer, deserializer, cycle guard
//!
//! [`Marshaller`] wraps all three behind one configured entry point.

#![warn(missing_docs)]

mod error;
mod marshaller;

pub mod prelude;

// Re-export main entry points
pub use error::{Error, Result};
pub use marshaller::{Marshaller, MarshallerBuilder};

// Re-export configuration and record bridge
pub use strata_client_marshal::{Hydrated, KeyCase, MarshalConfig, Record};

// Re-export the layers for direct use
pub use strata_client_core;
pub use strata_client_marshal;
pub use strata_client_wire;
