//! REST property map
//!
//! Native fields are copied in canonical form; composite fields recurse into
//! nested bags. A back-reference to an ancestor becomes an empty bag.

use super::canonical;
use crate::guard::CycleGuard;
use strata_client_core::{
    classify, Classification, FieldValue, Instance, PropertyBag, Result, SharedObject, Value,
};
use tracing::trace;

/// Flatten an object into a property map
pub fn flatten(instance: &Instance) -> Result<PropertyBag> {
    let mut guard = CycleGuard::new();
    flatten_instance(instance, &mut guard)
}

/// Flatten a shared object, treating it as the root of the cycle path
pub fn flatten_shared(object: &SharedObject) -> Result<PropertyBag> {
    let mut guard = CycleGuard::new();
    Ok(guard
        .visit(object, flatten_instance)?
        .unwrap_or_default())
}

fn flatten_instance(instance: &Instance, guard: &mut CycleGuard) -> Result<PropertyBag> {
    let mut bag = PropertyBag::new();
    for (field, value) in instance.fields() {
        if !field.readable || value.is_null() {
            continue;
        }
        let classification = classify(&field.kind);
        trace!("flatten {}.{} as {:?}", instance.type_name(), field.name, classification);
        let out = match classification {
            Classification::Composite => flatten_value(&field.name, value, guard)?,
            _ => canonical::to_value(&field.name, value)?,
        };
        bag.insert(field.name.as_str(), out);
    }
    Ok(bag)
}

fn flatten_value(field: &str, value: &FieldValue, guard: &mut CycleGuard) -> Result<Value> {
    match value {
        FieldValue::Object(object) => Ok(Value::Object(
            guard.visit(object, flatten_instance)?.unwrap_or_default(),
        )),
        FieldValue::List(items) => Ok(Value::Array(
            items
                .iter()
                .map(|item| flatten_value(field, item, guard))
                .collect::<Result<Vec<_>>>()?,
        )),
        other => canonical::to_value(field, other),
    }
}
