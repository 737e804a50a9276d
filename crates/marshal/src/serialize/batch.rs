//! gRPC batch properties
//!
//! Native arrays go to the typed entry for their element kind, arrays of
//! objects go to `object_array_properties`, and every other field lands in
//! `non_ref_properties`. Nested scalar objects are folded into a struct with
//! [`BatchProperties::into_struct`].

use super::canonical;
use crate::guard::CycleGuard;
use strata_client_core::{
    classify, Classification, FieldKind, FieldValue, Instance, MarshalError, Result,
    SharedObject, Value,
};
use strata_client_wire::batch::{
    BooleanArrayProperties, IntArrayProperties, NumberArrayProperties, ObjectArrayProperties,
    ReferenceArrayProperties, TextArrayProperties,
};
use strata_client_wire::BatchProperties;
use tracing::trace;

/// Build the batch-property message for an object
pub fn build_batch_properties(instance: &Instance) -> Result<BatchProperties> {
    let mut guard = CycleGuard::new();
    build_instance(instance, &mut guard)
}

/// Build for a shared object, treating it as the root of the cycle path
pub fn build_batch_properties_shared(object: &SharedObject) -> Result<BatchProperties> {
    let mut guard = CycleGuard::new();
    Ok(guard.visit(object, build_instance)?.unwrap_or_default())
}

fn build_instance(instance: &Instance, guard: &mut CycleGuard) -> Result<BatchProperties> {
    let mut props = BatchProperties::new();
    for (field, value) in instance.fields() {
        if !field.readable || value.is_null() {
            continue;
        }
        let name = field.name.as_str();
        // Nullable<List<_>> travels like List<_>
        let kind = unwrap_nullable(&field.kind);
        let classification = classify(kind);
        trace!("batch {}.{} as {:?}", instance.type_name(), name, classification);
        match (classification, kind) {
            (Classification::NativeArray(element), _) => {
                push_native_array(&mut props, name, element, value)?
            }
            (Classification::Composite, FieldKind::List(element)) => {
                push_object_array(&mut props, name, element, value, guard)?
            }
            (Classification::Composite, _) => {
                let nested = nested_properties(name, value, guard)?;
                props
                    .non_ref_properties
                    .insert(name, Value::Object(nested.into_struct()?));
            }
            (Classification::Native | Classification::NullableNative(_), _) => {
                props
                    .non_ref_properties
                    .insert(name, canonical::to_value(name, value)?);
            }
        }
    }
    Ok(props)
}

fn unwrap_nullable(kind: &FieldKind) -> &FieldKind {
    match kind {
        FieldKind::Nullable(inner) => unwrap_nullable(inner),
        other => other,
    }
}

fn list_items<'a>(name: &str, kind: &FieldKind, value: &'a FieldValue) -> Result<&'a [FieldValue]> {
    match value {
        FieldValue::List(items) => Ok(items),
        other => Err(MarshalError::FieldTypeMismatch {
            field: name.to_string(),
            expected: kind.type_name(),
            actual: other.kind_name(),
        }),
    }
}

fn push_native_array(
    props: &mut BatchProperties,
    name: &str,
    element: &FieldKind,
    value: &FieldValue,
) -> Result<()> {
    let list_kind = FieldKind::list(element.clone());
    let items = list_items(name, &list_kind, value)?;
    if items.iter().any(FieldValue::is_null) {
        return Err(MarshalError::unsupported_field(
            name,
            format!("null element in {}", list_kind.type_name()),
        ));
    }
    let mismatch = |item: &FieldValue| MarshalError::FieldTypeMismatch {
        field: name.to_string(),
        expected: element.type_name(),
        actual: item.kind_name(),
    };

    match unwrap_nullable(element) {
        FieldKind::Bool => {
            let values = items
                .iter()
                .map(|item| match item {
                    FieldValue::Bool(b) => Ok(*b),
                    other => Err(mismatch(other)),
                })
                .collect::<Result<Vec<_>>>()?;
            props.boolean_array_properties.push(BooleanArrayProperties {
                prop_name: name.to_string(),
                values,
            });
        }
        FieldKind::Int8
        | FieldKind::Int16
        | FieldKind::Int32
        | FieldKind::Int64
        | FieldKind::UInt8
        | FieldKind::UInt16
        | FieldKind::UInt32
        | FieldKind::UInt64 => {
            let values = items
                .iter()
                .map(|item| match item {
                    FieldValue::U64(_) => item
                        .as_i64()
                        .ok_or_else(|| MarshalError::unsupported_field(name, "UInt64")),
                    other => other.as_i64().ok_or_else(|| mismatch(other)),
                })
                .collect::<Result<Vec<_>>>()?;
            props.int_array_properties.push(IntArrayProperties {
                prop_name: name.to_string(),
                values,
            });
        }
        FieldKind::Float32 | FieldKind::Float64 => {
            let values = items
                .iter()
                .map(|item| item.as_f64().ok_or_else(|| mismatch(item)))
                .collect::<Result<Vec<_>>>()?;
            props
                .number_array_properties
                .push(NumberArrayProperties::from_values(name, &values));
        }
        FieldKind::Text | FieldKind::Date | FieldKind::Uri | FieldKind::Enum(_) => {
            let values = items
                .iter()
                .map(|item| canonical::to_text(item).ok_or_else(|| mismatch(item)))
                .collect::<Result<Vec<_>>>()?;
            props.text_array_properties.push(TextArrayProperties {
                prop_name: name.to_string(),
                values,
            });
        }
        FieldKind::Uuid => {
            let uuids = items
                .iter()
                .map(|item| match item {
                    FieldValue::Uuid(u) => Ok(u.hyphenated().to_string()),
                    other => Err(mismatch(other)),
                })
                .collect::<Result<Vec<_>>>()?;
            props.reference_array_properties.push(ReferenceArrayProperties {
                prop_name: name.to_string(),
                uuids,
            });
        }
        other => return Err(MarshalError::unsupported_field(name, other.type_name())),
    }
    Ok(())
}

fn push_object_array(
    props: &mut BatchProperties,
    name: &str,
    element: &FieldKind,
    value: &FieldValue,
    guard: &mut CycleGuard,
) -> Result<()> {
    match unwrap_nullable(element) {
        FieldKind::Object(_) | FieldKind::Dynamic => {}
        other => return Err(MarshalError::unsupported_field(name, other.type_name())),
    }
    let items = list_items(name, &FieldKind::list(element.clone()), value)?;
    let values = items
        .iter()
        .map(|item| nested_properties(name, item, guard))
        .collect::<Result<Vec<_>>>()?;
    props.object_array_properties.push(ObjectArrayProperties {
        prop_name: name.to_string(),
        values,
    });
    Ok(())
}

fn nested_properties(name: &str, value: &FieldValue, guard: &mut CycleGuard) -> Result<BatchProperties> {
    match value {
        FieldValue::Null => Ok(BatchProperties::new()),
        FieldValue::Object(object) => Ok(guard.visit(object, build_instance)?.unwrap_or_default()),
        FieldValue::Dynamic(record) => Ok(BatchProperties {
            non_ref_properties: canonical::record_to_bag(name, record)?,
            ..BatchProperties::new()
        }),
        other => Err(MarshalError::unsupported_field(name, other.kind_name())),
    }
}
