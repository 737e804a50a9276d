//! Bridge between caller structs and typed objects
//!
//! A struct that implements [`Record`] declares its schema once and converts
//! to and from an [`Instance`]; the marshalling functions then work on the
//! struct directly.

use std::sync::Arc;
use strata_client_core::{Instance, Result, TypeDescriptor};

/// A caller type with a fixed schema
///
/// ```
/// use std::sync::Arc;
/// use strata_client_core::{FieldKind, FieldValue, Instance, Result, TypeDescriptor};
/// use strata_client_marshal::Record;
///
/// struct Tag {
///     label: String,
/// }
///
/// impl Record for Tag {
///     fn descriptor() -> Arc<TypeDescriptor> {
///         TypeDescriptor::builder("Tag").field("Label", FieldKind::Text).build()
///     }
///
///     fn to_instance(&self) -> Result<Instance> {
///         Instance::new(&Self::descriptor()).with("Label", self.label.as_str())
///     }
///
///     fn from_instance(instance: &Instance) -> Self {
///         Tag {
///             label: instance
///                 .get("Label")
///                 .and_then(FieldValue::as_text)
///                 .unwrap_or_default()
///                 .to_string(),
///         }
///     }
/// }
///
/// let bag = strata_client_marshal::flatten_record(&Tag { label: "red".into() }).unwrap();
/// let back: Tag = strata_client_marshal::unmarshal_record(&bag);
/// assert_eq!(back.label, "red");
/// ```
pub trait Record: Sized {
    /// Schema of the type
    fn descriptor() -> Arc<TypeDescriptor>;

    /// Convert to a typed object
    fn to_instance(&self) -> Result<Instance>;

    /// Build from a hydrated object; fields absent on the wire hold zero values
    fn from_instance(instance: &Instance) -> Self;
}
