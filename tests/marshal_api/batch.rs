//! gRPC batch properties through the facade

use crate::fixtures::{address, customer, Person};
use strata_client::prelude::*;
use strata_client::strata_client_wire::ArrayKind;

#[test]
fn arrays_are_split_by_element_kind() {
    let person = Person {
        name: "Cleo".into(),
        age: 22,
        location: Some(GeoCoordinate::new(5.0, 6.0)),
        tags: vec!["x".into()],
    };
    let props = Marshaller::new().batch_record(&person).unwrap();
    assert_eq!(props.non_ref_properties.get("Name"), Some(&Value::from("Cleo")));
    assert_eq!(props.non_ref_properties.get("Age"), Some(&Value::Int(22)));
    assert!(props.nested("Location").is_some());
    assert_eq!(props.array_kind("Tags"), Some(ArrayKind::Text));
    assert!(!props.non_ref_properties.contains_key("Tags"));
}

#[test]
fn object_lists_become_object_arrays() {
    let c = Instance::new(&customer())
        .with("Home", Instance::new(&address()).with("City", "A").unwrap())
        .unwrap()
        .with(
            "Previous",
            FieldValue::list([
                Instance::new(&address()).with("City", "B").unwrap(),
                Instance::new(&address()).with("City", "C").unwrap(),
            ]),
        )
        .unwrap();
    let props = Marshaller::new().batch_properties(&c).unwrap();
    assert_eq!(
        props.nested("Home").and_then(|h| h.get("City")),
        Some(&Value::from("A"))
    );
    let previous = props.object_array("Previous").unwrap();
    let cities: Vec<_> = previous
        .iter()
        .map(|p| p.non_ref_properties.get("City").cloned())
        .collect();
    assert_eq!(cities, vec![Some(Value::from("B")), Some(Value::from("C"))]);
}

#[test]
fn unsupported_array_element_names_field_and_type() {
    let descriptor = TypeDescriptor::builder("Trip")
        .field("Stops", FieldKind::list(FieldKind::Geo))
        .build();
    let trip = Instance::new(&descriptor)
        .with("Stops", FieldValue::list([GeoCoordinate::new(0.0, 0.0)]))
        .unwrap();

    let marshaller = Marshaller::new();
    let err = marshaller.batch_properties(&trip).unwrap_err();
    assert!(err.is_unsupported_type());
    let msg = err.to_string();
    assert!(msg.contains("Stops"), "{}", msg);
    assert!(msg.contains("Geo"), "{}", msg);

    // the REST shape has no such restriction
    let bag = marshaller.flatten(&trip).unwrap();
    assert_eq!(bag.get("Stops").and_then(Value::as_array).map(|a| a.len()), Some(1));
}

#[test]
fn batch_message_serializes_with_serde() {
    let person = Person {
        name: "Dee".into(),
        age: 3,
        location: None,
        tags: vec![],
    };
    let props = Marshaller::new().batch_record(&person).unwrap();
    let json = serde_json::to_string(&props).unwrap();
    let back: BatchProperties = serde_json::from_str(&json).unwrap();
    assert_eq!(back, props);
}
