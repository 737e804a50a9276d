//! REST flattening through the facade

use crate::fixtures::{address, customer, person, Person};
use strata_client::prelude::*;

#[test]
fn alice_flattens_to_canonical_json() {
    let alice = Instance::new(&person())
        .with("Name", "Alice")
        .unwrap()
        .with("Age", 30)
        .unwrap()
        .with("Location", GeoCoordinate::new(1.0, 2.0))
        .unwrap();

    let marshaller = Marshaller::new();
    let bag = marshaller.flatten(&alice).unwrap();
    assert_eq!(bag.keys().collect::<Vec<_>>(), vec!["Name", "Age", "Location"]);

    let json = marshaller.to_json(&alice).unwrap();
    assert_eq!(
        json,
        r#"{"Name":"Alice","Age":30,"Location":{"latitude":1.0,"longitude":2.0}}"#
    );
}

#[test]
fn record_and_instance_flatten_identically() {
    let person = Person {
        name: "Bob".into(),
        age: 41,
        location: None,
        tags: vec!["a".into(), "b".into()],
    };
    let marshaller = Marshaller::new();
    let from_record = marshaller.flatten_record(&person).unwrap();
    let from_instance = marshaller.flatten(&person.to_instance().unwrap()).unwrap();
    assert_eq!(from_record, from_instance);
    assert_eq!(
        from_record.get("Tags"),
        Some(&Value::Array(vec![Value::from("a"), Value::from("b")]))
    );
    assert!(!from_record.contains_key("Location"));
}

#[test]
fn nested_objects_become_nested_maps() {
    let home = Instance::new(&address())
        .with("Street", "Main")
        .unwrap()
        .with("City", "Springfield")
        .unwrap();
    let old = Instance::new(&address()).with("City", "Shelbyville").unwrap();
    let c = Instance::new(&customer())
        .with("Name", "Homer")
        .unwrap()
        .with("Home", home)
        .unwrap()
        .with("Previous", FieldValue::list([old]))
        .unwrap();

    let json = Marshaller::new().to_json(&c).unwrap();
    assert_eq!(
        json,
        r#"{"Name":"Homer","Home":{"Street":"Main","City":"Springfield"},"Previous":[{"City":"Shelbyville"}]}"#
    );
}

#[test]
fn non_finite_float_is_rejected_by_json_encoding() {
    let descriptor = TypeDescriptor::builder("Reading")
        .field("Value", FieldKind::Float64)
        .build();
    let reading = Instance::new(&descriptor).with("Value", f64::NAN).unwrap();
    let marshaller = Marshaller::new();
    assert!(marshaller.flatten(&reading).is_ok());
    let err = marshaller.to_json(&reading).unwrap_err();
    assert!(err.to_string().contains("Value"), "{}", err);
}
