//! Property marshalling for the Strata client
//!
//! Converts typed objects to the server's two wire shapes and back:
//!
//! - [`flatten`] builds the REST property map
//! - [`build_batch_properties`] builds the gRPC batch message
//! - [`unmarshal`] and friends hydrate a property map into a typed object or a
//!   schema-less [`DynamicRecord`](strata_client_core::DynamicRecord)
//!
//! Serialization is cycle-safe: a back-reference to an ancestor object is
//! written as an empty nested value. Deserialization is lenient by default;
//! see [`MarshalConfig`] for strict mode.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod coerce;
pub mod config;
pub mod deserialize;
pub mod guard;
pub mod record;
pub mod serialize;

pub use config::{KeyCase, MarshalConfig};
pub use deserialize::{
    unmarshal, unmarshal_dynamic, unmarshal_with, unmarshal_with_report, Hydrated,
};
pub use guard::CycleGuard;
pub use record::Record;
pub use serialize::{
    build_batch_properties, build_batch_properties_shared, flatten, flatten_shared,
};

use strata_client_core::{PropertyBag, Result};
use strata_client_wire::BatchProperties;

/// Flatten a [`Record`]
pub fn flatten_record<T: Record>(record: &T) -> Result<PropertyBag> {
    flatten(&record.to_instance()?)
}

/// Build batch properties for a [`Record`]
pub fn batch_record<T: Record>(record: &T) -> Result<BatchProperties> {
    build_batch_properties(&record.to_instance()?)
}

/// Hydrate a [`Record`] leniently
pub fn unmarshal_record<T: Record>(bag: &PropertyBag) -> T {
    T::from_instance(&unmarshal(bag, &T::descriptor()))
}

/// Hydrate a [`Record`] under `config`
pub fn unmarshal_record_with<T: Record>(bag: &PropertyBag, config: &MarshalConfig) -> Result<T> {
    let hydrated = unmarshal_with(bag, &T::descriptor(), config)?;
    Ok(T::from_instance(&hydrated.instance))
}
