//! The marshalling facade.

use crate::error::Result;
use std::sync::Arc;
use strata_client_core::{DynamicRecord, Instance, PropertyBag, SharedObject, TypeDescriptor};
use strata_client_marshal::{Hydrated, KeyCase, MarshalConfig, Record};
use strata_client_wire::{BatchProperties, ElementKind, VectorValue};
use tracing::debug;

/// Converts typed objects to and from the server's wire shapes.
///
/// Create one with [`Marshaller::new`] or [`Marshaller::builder`]. A
/// marshaller holds only its configuration; it is cheap to clone and safe to
/// share between threads.
///
/// # Example
///
/// ```
/// use strata_client::prelude::*;
///
/// let person = TypeDescriptor::builder("Person")
///     .field("Name", FieldKind::Text)
///     .field("Age", FieldKind::Int32)
///     .build();
/// let alice = Instance::new(&person).with("Name", "Alice")?.with("Age", 30)?;
///
/// let marshaller = Marshaller::new();
/// let json = marshaller.to_json(&alice)?;
/// assert_eq!(json, r#"{"Name":"Alice","Age":30}"#);
///
/// let back = marshaller.from_json(&json, &person)?;
/// assert_eq!(back, alice);
/// # Ok::<(), strata_client::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Marshaller {
    config: MarshalConfig,
}

impl Marshaller {
    /// Create a marshaller with default settings (lenient, camel-case keys).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for marshaller configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use strata_client::{KeyCase, Marshaller};
    ///
    /// let marshaller = Marshaller::builder()
    ///     .strict()
    ///     .dynamic_key_case(KeyCase::Preserve)
    ///     .build();
    /// assert!(marshaller.config().strict);
    /// ```
    pub fn builder() -> MarshallerBuilder {
        MarshallerBuilder::new()
    }

    /// Get the active configuration.
    pub fn config(&self) -> &MarshalConfig {
        &self.config
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    /// Flatten an object into the REST property map.
    pub fn flatten(&self, instance: &Instance) -> Result<PropertyBag> {
        Ok(strata_client_marshal::flatten(instance)?)
    }

    /// Flatten a shared object; a back-reference to it is truncated.
    pub fn flatten_object(&self, object: &SharedObject) -> Result<PropertyBag> {
        Ok(strata_client_marshal::flatten_shared(object)?)
    }

    /// Flatten a [`Record`].
    pub fn flatten_record<T: Record>(&self, record: &T) -> Result<PropertyBag> {
        Ok(strata_client_marshal::flatten_record(record)?)
    }

    /// Build the gRPC batch-property message for an object.
    pub fn batch_properties(&self, instance: &Instance) -> Result<BatchProperties> {
        Ok(strata_client_marshal::build_batch_properties(instance)?)
    }

    /// Build batch properties for a shared object; a back-reference to it is truncated.
    pub fn batch_properties_object(&self, object: &SharedObject) -> Result<BatchProperties> {
        Ok(strata_client_marshal::build_batch_properties_shared(object)?)
    }

    /// Build batch properties for a [`Record`].
    pub fn batch_record<T: Record>(&self, record: &T) -> Result<BatchProperties> {
        Ok(strata_client_marshal::batch_record(record)?)
    }

    /// Flatten an object and encode it as a REST JSON body.
    pub fn to_json(&self, instance: &Instance) -> Result<String> {
        let bag = self.flatten(instance)?;
        Ok(strata_client_wire::encode_json(&bag)?)
    }

    // =========================================================================
    // Deserialization
    // =========================================================================

    /// Hydrate a property map into an object of `descriptor`.
    ///
    /// Lenient mode skips fields that fail to convert; strict mode returns
    /// the first failure as [`Error::Conversion`](crate::Error::Conversion).
    pub fn unmarshal(
        &self,
        bag: &PropertyBag,
        descriptor: &Arc<TypeDescriptor>,
    ) -> Result<Instance> {
        Ok(self.unmarshal_with_report(bag, descriptor)?.instance)
    }

    /// Hydrate and report the fields that were skipped.
    pub fn unmarshal_with_report(
        &self,
        bag: &PropertyBag,
        descriptor: &Arc<TypeDescriptor>,
    ) -> Result<Hydrated> {
        Ok(strata_client_marshal::unmarshal_with(bag, descriptor, &self.config)?)
    }

    /// Hydrate a [`Record`].
    pub fn unmarshal_record<T: Record>(&self, bag: &PropertyBag) -> Result<T> {
        Ok(strata_client_marshal::unmarshal_record_with(bag, &self.config)?)
    }

    /// Hydrate into a schema-less record.
    pub fn unmarshal_dynamic(&self, bag: &PropertyBag) -> DynamicRecord {
        strata_client_marshal::unmarshal_dynamic(bag, self.config.dynamic_key_case)
    }

    /// Decode a REST JSON body and hydrate it into an object of `descriptor`.
    pub fn from_json(&self, json: &str, descriptor: &Arc<TypeDescriptor>) -> Result<Instance> {
        let bag = strata_client_wire::decode_json(json)?;
        self.unmarshal(&bag, descriptor)
    }

    // =========================================================================
    // Vectors
    // =========================================================================

    /// Encode a vector payload.
    pub fn encode_vector(&self, vector: &VectorValue) -> Result<Vec<u8>> {
        Ok(vector.to_bytes()?)
    }

    /// Decode a vector payload of a known kind and shape.
    pub fn decode_vector(
        &self,
        name: Option<String>,
        bytes: &[u8],
        kind: ElementKind,
        multi: bool,
    ) -> Result<VectorValue> {
        Ok(VectorValue::from_bytes(name, bytes, kind, multi)?)
    }
}

/// Builder for marshaller configuration.
///
/// # Example
///
/// ```
/// use strata_client::{MarshalConfig, Marshaller};
///
/// // Strict: the first unconvertible field is an error
/// let strict = Marshaller::builder().strict().build();
///
/// // From a deserialized config
/// let config: MarshalConfig = serde_json::from_str(r#"{"strict": false}"#).unwrap();
/// let lenient = Marshaller::builder().config(config).build();
/// assert!(!lenient.config().strict);
/// # let _ = strict;
/// ```
#[derive(Debug, Clone, Default)]
pub struct MarshallerBuilder {
    config: MarshalConfig,
}

impl MarshallerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail on the first field that cannot be converted.
    pub fn strict(mut self) -> Self {
        self.config.strict = true;
        self
    }

    /// Skip fields that cannot be converted (default).
    pub fn lenient(mut self) -> Self {
        self.config.strict = false;
        self
    }

    /// Set key normalization for schema-less records.
    pub fn dynamic_key_case(mut self, key_case: KeyCase) -> Self {
        self.config.dynamic_key_case = key_case;
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: MarshalConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the marshaller.
    pub fn build(self) -> Marshaller {
        debug!(
            "Marshaller configured: strict={}, dynamic_key_case={:?}",
            self.config.strict, self.config.dynamic_key_case
        );
        Marshaller {
            config: self.config,
        }
    }
}
