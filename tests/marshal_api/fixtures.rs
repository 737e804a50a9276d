//! Shared descriptors and records

use std::sync::Arc;
use strata_client::prelude::*;

pub fn person() -> Arc<TypeDescriptor> {
    TypeDescriptor::builder("Person")
        .field("Name", FieldKind::Text)
        .field("Age", FieldKind::Int32)
        .field("Location", FieldKind::nullable(FieldKind::Geo))
        .field("Tags", FieldKind::list(FieldKind::Text))
        .build()
}

pub fn address() -> Arc<TypeDescriptor> {
    TypeDescriptor::builder("Address")
        .field("Street", FieldKind::Text)
        .field("City", FieldKind::Text)
        .build()
}

pub fn customer() -> Arc<TypeDescriptor> {
    let address = address();
    TypeDescriptor::builder("Customer")
        .field("Name", FieldKind::Text)
        .field("Home", FieldKind::object(&address))
        .field("Previous", FieldKind::list(FieldKind::object(&address)))
        .build()
}

/// `Node { Label, Parent, Children }`, self-referential
pub fn node() -> Arc<TypeDescriptor> {
    TypeDescriptor::recursive("Node", |me| {
        vec![
            FieldDescriptor::new("Label", FieldKind::Text),
            FieldDescriptor::new("Parent", FieldKind::Object(me.clone())),
            FieldDescriptor::new("Children", FieldKind::list(FieldKind::Object(me))),
        ]
    })
}

pub fn bag(entries: &[(&str, Value)]) -> PropertyBag {
    entries.iter().map(|(k, v)| (*k, v.clone())).collect()
}

/// A caller struct bridged through [`Record`]
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub name: String,
    pub age: i32,
    pub location: Option<GeoCoordinate>,
    pub tags: Vec<String>,
}

impl Record for Person {
    fn descriptor() -> Arc<TypeDescriptor> {
        person()
    }

    fn to_instance(&self) -> strata_client::strata_client_core::Result<Instance> {
        Instance::new(&Self::descriptor())
            .with("Name", self.name.as_str())?
            .with("Age", self.age)?
            .with("Location", self.location)?
            .with("Tags", FieldValue::list(self.tags.iter().cloned()))
    }

    fn from_instance(instance: &Instance) -> Self {
        let tags = match instance.get("Tags") {
            Some(FieldValue::List(items)) => items
                .iter()
                .filter_map(|t| t.as_text().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        };
        Person {
            name: instance
                .get("Name")
                .and_then(FieldValue::as_text)
                .unwrap_or_default()
                .to_string(),
            age: instance
                .get("Age")
                .and_then(FieldValue::as_i64)
                .and_then(|a| i32::try_from(a).ok())
                .unwrap_or_default(),
            location: match instance.get("Location") {
                Some(FieldValue::Geo(g)) => Some(*g),
                _ => None,
            },
            tags,
        }
    }
}
