//! Convenient imports for the Strata client.
//!
//! ```
//! use strata_client::prelude::*;
//!
//! let marshaller = Marshaller::new();
//! let record = marshaller.unmarshal_dynamic(&PropertyBag::new());
//! assert!(record.is_empty());
//! ```

// Main entry point
pub use crate::marshaller::{Marshaller, MarshallerBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Configuration and record bridge
pub use strata_client_marshal::{Hydrated, KeyCase, MarshalConfig, Record};

// Schema and objects
pub use strata_client_core::{
    DynamicRecord, EnumDescriptor, FieldDescriptor, FieldKind, FieldValue, Instance,
    SharedObject, TypeDescriptor,
};

// Values and domain types
pub use strata_client_core::{EnumValue, GeoCoordinate, PhoneNumber, PropertyBag, Value};

// Wire shapes
pub use strata_client_wire::{BatchProperties, ElementKind, Shape, VectorData, VectorValue};
