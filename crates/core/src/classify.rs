//! Type classification
//!
//! Decides, from a [`FieldKind`] alone, whether a field has a direct wire
//! representation or must be decomposed.
//!
//! | Kind | Classification |
//! |------|----------------|
//! | scalars, text, date, uuid, uri, geo, phone, blob, enum | `Native` |
//! | `Nullable(native)` | `NullableNative(inner)` |
//! | `List(native)` | `NativeArray(element)` |
//! | `UntypedList` | `Native` (approximation) |
//! | objects, dynamic records, anything wrapping them | `Composite` |
//!
//! `UntypedList` is treated as native because its elements cannot be known
//! ahead of time; the serializer writes whatever scalars it finds.

use crate::schema::FieldKind;

/// Result of classifying a field kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classification<'a> {
    /// Directly representable
    Native,
    /// Optional wrapper around a native kind
    NullableNative(&'a FieldKind),
    /// Collection of a native element kind
    NativeArray(&'a FieldKind),
    /// Requires recursive decomposition
    Composite,
}

impl Classification<'_> {
    /// True for every non-composite classification
    pub fn is_native(&self) -> bool {
        !matches!(self, Classification::Composite)
    }
}

/// Classify a field kind
pub fn classify(kind: &FieldKind) -> Classification<'_> {
    match kind {
        FieldKind::Bool
        | FieldKind::Int8
        | FieldKind::Int16
        | FieldKind::Int32
        | FieldKind::Int64
        | FieldKind::UInt8
        | FieldKind::UInt16
        | FieldKind::UInt32
        | FieldKind::UInt64
        | FieldKind::Float32
        | FieldKind::Float64
        | FieldKind::Text
        | FieldKind::Date
        | FieldKind::Uuid
        | FieldKind::Uri
        | FieldKind::Geo
        | FieldKind::Phone
        | FieldKind::Blob
        | FieldKind::Enum(_)
        | FieldKind::UntypedList => Classification::Native,
        FieldKind::Nullable(inner) => match classify(inner) {
            Classification::Native => Classification::NullableNative(inner),
            _ => Classification::Composite,
        },
        FieldKind::List(element) => {
            if is_scalar_native(element) {
                Classification::NativeArray(element)
            } else {
                Classification::Composite
            }
        }
        FieldKind::Object(_) | FieldKind::Dynamic => Classification::Composite,
    }
}

/// Native, and not itself a collection
///
/// `List<UntypedList>` and `List<List<_>>` are composites: the element is a
/// collection, which has no single-array wire form.
fn is_scalar_native(kind: &FieldKind) -> bool {
    match kind {
        FieldKind::UntypedList => false,
        FieldKind::Nullable(inner) => is_scalar_native(inner),
        other => matches!(classify(other), Classification::Native),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EnumDescriptor, TypeDescriptor};

    #[test]
    fn test_scalars_are_native() {
        for kind in [
            FieldKind::Bool,
            FieldKind::Int8,
            FieldKind::UInt32,
            FieldKind::UInt64,
            FieldKind::Float32,
            FieldKind::Text,
            FieldKind::Date,
            FieldKind::Uuid,
            FieldKind::Uri,
            FieldKind::Geo,
            FieldKind::Phone,
            FieldKind::Blob,
            FieldKind::Enum(EnumDescriptor::new("E", [("A", 0)])),
        ] {
            assert_eq!(classify(&kind), Classification::Native, "{:?}", kind);
        }
    }

    #[test]
    fn test_nullable_native() {
        let kind = FieldKind::nullable(FieldKind::Int32);
        assert_eq!(
            classify(&kind),
            Classification::NullableNative(&FieldKind::Int32)
        );
    }

    #[test]
    fn test_native_array() {
        let kind = FieldKind::list(FieldKind::Text);
        assert_eq!(classify(&kind), Classification::NativeArray(&FieldKind::Text));
        let kind = FieldKind::list(FieldKind::nullable(FieldKind::Float64));
        assert!(matches!(classify(&kind), Classification::NativeArray(_)));
    }

    #[test]
    fn test_untyped_list_is_native() {
        assert_eq!(classify(&FieldKind::UntypedList), Classification::Native);
    }

    #[test]
    fn test_composites() {
        let address = TypeDescriptor::builder("Address")
            .field("Street", FieldKind::Text)
            .build();
        assert_eq!(classify(&FieldKind::object(&address)), Classification::Composite);
        assert_eq!(
            classify(&FieldKind::list(FieldKind::object(&address))),
            Classification::Composite
        );
        assert_eq!(
            classify(&FieldKind::nullable(FieldKind::object(&address))),
            Classification::Composite
        );
        assert_eq!(classify(&FieldKind::Dynamic), Classification::Composite);
        assert_eq!(
            classify(&FieldKind::list(FieldKind::list(FieldKind::Int32))),
            Classification::Composite
        );
        assert!(!Classification::Composite.is_native());
    }
}
