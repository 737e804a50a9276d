//! Property deserializer
//!
//! Hydrates a property map into a typed [`Instance`] or a schema-less
//! [`DynamicRecord`]. Field names match case-insensitively, with an exact
//! match taking precedence. Keys the type does not declare are ignored and
//! declared fields missing from the map keep their zero value.
//!
//! Each value goes through the first rule that applies:
//!
//! 1. null becomes null, or the zero value for value kinds
//! 2. an exact wire match is passed through
//! 3. a nullable target is unwrapped
//! 4. a nested map hydrates an object, geo coordinate, phone number or record
//! 5. an array hydrates a list element by element
//! 6. an enum target takes a variant name (any case) or numeric value
//! 7. anything else goes through the [`coerce`](crate::coerce) table
//!
//! A value that fails conversion is skipped and reported; the rest of the
//! object is still hydrated.

use crate::coerce::{coerce_scalar, integral};
use crate::config::{KeyCase, MarshalConfig};
use std::sync::Arc;
use strata_client_core::{
    ConversionError, DynamicRecord, EnumDescriptor, FieldKind, FieldValue, GeoCoordinate,
    Instance, MarshalError, PhoneNumber, PropertyBag, Result, SharedObject, TypeDescriptor,
    Value,
};
use tracing::{debug, warn};

/// A hydrated object plus the conversions that were skipped
#[derive(Debug, Clone)]
pub struct Hydrated {
    /// The object; skipped fields hold their zero value
    pub instance: Instance,
    /// One entry per skipped field, in visit order
    pub skipped: Vec<ConversionError>,
}

impl Hydrated {
    /// True if every present field converted
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Hydrate leniently, dropping fields that fail to convert
pub fn unmarshal(bag: &PropertyBag, descriptor: &Arc<TypeDescriptor>) -> Instance {
    unmarshal_with_report(bag, descriptor).instance
}

/// Hydrate leniently and report what was skipped
pub fn unmarshal_with_report(bag: &PropertyBag, descriptor: &Arc<TypeDescriptor>) -> Hydrated {
    let mut hydrator = Hydrator::new(KeyCase::default());
    let instance = hydrator.hydrate(bag, descriptor, "");
    hydrator.finish(instance, false)
}

/// Hydrate under `config`
///
/// In strict mode the first conversion failure is returned as an error.
pub fn unmarshal_with(
    bag: &PropertyBag,
    descriptor: &Arc<TypeDescriptor>,
    config: &MarshalConfig,
) -> Result<Hydrated> {
    let mut hydrator = Hydrator::new(config.dynamic_key_case);
    let instance = hydrator.hydrate(bag, descriptor, "");
    let hydrated = hydrator.finish(instance, config.strict);
    match (config.strict, hydrated.skipped.first()) {
        (true, Some(first)) => Err(MarshalError::Conversion(first.clone())),
        _ => Ok(hydrated),
    }
}

/// Hydrate into a schema-less record
pub fn unmarshal_dynamic(bag: &PropertyBag, key_case: KeyCase) -> DynamicRecord {
    Hydrator::new(key_case).record(bag)
}

struct Hydrator {
    key_case: KeyCase,
    skipped: Vec<ConversionError>,
}

impl Hydrator {
    fn new(key_case: KeyCase) -> Self {
        Hydrator {
            key_case,
            skipped: Vec::new(),
        }
    }

    fn finish(self, instance: Instance, strict: bool) -> Hydrated {
        if !strict {
            for err in &self.skipped {
                warn!("Skipping field during hydration of {}: {}", instance.type_name(), err);
            }
        }
        Hydrated {
            instance,
            skipped: self.skipped,
        }
    }

    fn hydrate(&mut self, bag: &PropertyBag, descriptor: &Arc<TypeDescriptor>, prefix: &str) -> Instance {
        let mut instance = Instance::new(descriptor);
        for field in descriptor.fields() {
            if !field.writable {
                continue;
            }
            let Some((_, value)) = bag.get_ignore_case(&field.name) else {
                continue;
            };
            let path = if prefix.is_empty() {
                field.name.clone()
            } else {
                format!("{}.{}", prefix, field.name)
            };
            let assigned = self
                .coerce(value, &field.kind, &path)
                .and_then(|converted| {
                    instance.set(&field.name, converted).map_err(|e| {
                        ConversionError::new(&path, field.kind.type_name(), value.type_name(), e.to_string())
                    })
                });
            if let Err(err) = assigned {
                self.skipped.push(err);
            }
        }
        instance
    }

    fn coerce(
        &mut self,
        value: &Value,
        kind: &FieldKind,
        path: &str,
    ) -> std::result::Result<FieldValue, ConversionError> {
        let fail = |reason: String| {
            ConversionError::new(path, kind.type_name(), value.type_name(), reason)
        };
        match (value, kind) {
            (Value::Null, k) => Ok(k.zero_value()),

            (Value::Bool(b), FieldKind::Bool) => Ok(FieldValue::Bool(*b)),
            (Value::Int(i), FieldKind::Int64) => Ok(FieldValue::I64(*i)),
            (Value::Float(f), FieldKind::Float64) => Ok(FieldValue::F64(*f)),
            (Value::String(s), FieldKind::Text) => Ok(FieldValue::Text(s.clone())),

            (v, FieldKind::Nullable(inner)) => self.coerce(v, inner, path),

            (Value::Object(bag), FieldKind::Object(target)) => {
                let descriptor = target
                    .resolve()
                    .ok_or_else(|| fail(format!("type {} is no longer alive", target.name())))?;
                Ok(FieldValue::Object(SharedObject::new(
                    self.hydrate(bag, &descriptor, path),
                )))
            }
            (Value::Object(bag), FieldKind::Geo) => GeoCoordinate::from_bag(bag)
                .map(FieldValue::Geo)
                .ok_or_else(|| fail("expected {latitude, longitude}".to_string())),
            (Value::Object(bag), FieldKind::Phone) => PhoneNumber::from_bag(bag)
                .map(FieldValue::Phone)
                .ok_or_else(|| fail("not a phone number structure".to_string())),
            (Value::Object(bag), FieldKind::Dynamic) => Ok(FieldValue::Dynamic(self.record(bag))),

            (Value::Array(items), FieldKind::List(element)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| self.coerce(item, element, &format!("{}[{}]", path, i)))
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(FieldValue::List),
            (Value::Array(items), FieldKind::UntypedList) => Ok(FieldValue::List(
                items.iter().map(|item| self.dynamic_value(item)).collect(),
            )),

            (v, FieldKind::Enum(descriptor)) => enum_variant(v, descriptor).ok_or_else(|| {
                fail(format!("not a variant of {}", descriptor.name))
            }),

            (v, k) => coerce_scalar(v, k).map_err(fail),
        }
    }

    fn record(&mut self, bag: &PropertyBag) -> DynamicRecord {
        let mut record = DynamicRecord::new();
        for (key, value) in bag.iter() {
            let normalized = self.key_case.apply(key);
            let converted = self.dynamic_value(value);
            if record.insert(normalized.as_str(), converted).is_some() {
                debug!("Key '{}' collides after normalization; keeping the last value", normalized);
            }
        }
        record
    }

    fn dynamic_value(&mut self, value: &Value) -> FieldValue {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::Int(i) => FieldValue::I64(*i),
            Value::Float(f) => FieldValue::F64(*f),
            Value::String(s) => FieldValue::Text(s.clone()),
            Value::Array(items) => {
                FieldValue::List(items.iter().map(|item| self.dynamic_value(item)).collect())
            }
            Value::Object(bag) => {
                if let Some(geo) = GeoCoordinate::from_bag(bag) {
                    debug!("Recognized geo coordinate in schema-less record");
                    FieldValue::Geo(geo)
                } else if let Some(phone) = PhoneNumber::from_bag(bag) {
                    debug!("Recognized phone number in schema-less record");
                    FieldValue::Phone(phone)
                } else {
                    FieldValue::Dynamic(self.record(bag))
                }
            }
        }
    }
}

fn enum_variant(value: &Value, descriptor: &EnumDescriptor) -> Option<FieldValue> {
    let variant = match value {
        Value::String(s) => descriptor.by_name(s.trim()).or_else(|| {
            s.trim()
                .parse::<i64>()
                .ok()
                .and_then(|n| descriptor.by_value(n))
        }),
        Value::Int(i) => descriptor.by_value(*i),
        Value::Float(f) => integral(*f).ok().and_then(|n| descriptor.by_value(n)),
        _ => None,
    };
    variant.cloned().map(FieldValue::Enum)
}
