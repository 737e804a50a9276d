//! Hydration of property maps into typed objects and records

use crate::fixtures::{bag, customer, person, Person};
use strata_client::prelude::*;

#[test]
fn field_names_match_case_insensitively() {
    let marshaller = Marshaller::new();
    for key in ["Name", "name", "NAME", "nAmE"] {
        let p = marshaller
            .unmarshal(&bag(&[(key, Value::from("Alice"))]), &person())
            .unwrap();
        assert_eq!(p.get("Name"), Some(&FieldValue::from("Alice")), "key {}", key);
    }
}

#[test]
fn unknown_keys_ignored_and_missing_fields_default() {
    let p = Marshaller::new()
        .unmarshal(
            &bag(&[
                ("Name", Value::from("Bob")),
                ("Shoe", Value::Int(44)),
                ("extra", Value::Array(vec![])),
            ]),
            &person(),
        )
        .unwrap();
    assert_eq!(p.get("Name"), Some(&FieldValue::from("Bob")));
    assert_eq!(p.get("Age"), Some(&FieldValue::I32(0)));
    assert_eq!(p.get("Location"), Some(&FieldValue::Null));
    assert_eq!(p.get("Tags"), Some(&FieldValue::Null));
}

#[test]
fn json_body_hydrates_record() {
    let json = r#"{
        "name": "Cleo",
        "age": "27",
        "location": {"latitude": 52, "longitude": 4.9},
        "tags": ["x", "y"]
    }"#;
    let marshaller = Marshaller::new();
    let bag = strata_client::strata_client_wire::decode_json(json).unwrap();
    let cleo: Person = marshaller.unmarshal_record(&bag).unwrap();
    assert_eq!(
        cleo,
        Person {
            name: "Cleo".into(),
            age: 27,
            location: Some(GeoCoordinate::new(52.0, 4.9)),
            tags: vec!["x".into(), "y".into()],
        }
    );
}

#[test]
fn nested_objects_hydrate_with_identity() {
    let json = r#"{"Name":"Homer","Home":{"city":"Springfield"},"Previous":[{"City":"A"},{"City":"B"}]}"#;
    let c = Marshaller::new().from_json(json, &customer()).unwrap();

    let home = c.get("Home").and_then(FieldValue::as_object).unwrap();
    assert_eq!(home.type_name(), "Address");
    assert_eq!(home.read().get("City"), Some(&FieldValue::from("Springfield")));

    match c.get("Previous") {
        Some(FieldValue::List(items)) => {
            assert_eq!(items.len(), 2);
            let b = items[1].as_object().unwrap();
            assert_eq!(b.read().get("City"), Some(&FieldValue::from("B")));
            assert!(!b.ptr_eq(items[0].as_object().unwrap()));
        }
        other => panic!("expected list, got {:?}", other),
    }
}

#[test]
fn report_lists_every_skipped_field() {
    let hydrated = Marshaller::new()
        .unmarshal_with_report(
            &bag(&[
                ("Name", Value::Int(7)),
                ("Age", Value::Float(2.5)),
                ("Location", Value::from("here")),
                ("Tags", Value::Array(vec![Value::from("ok")])),
            ]),
            &person(),
        )
        .unwrap();
    let skipped: Vec<_> = hydrated.skipped.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(skipped, vec!["Age", "Location"]);
    assert_eq!(hydrated.instance.get("Name"), Some(&FieldValue::from("7")));
    assert_eq!(
        hydrated.instance.get("Tags"),
        Some(&FieldValue::list(["ok"]))
    );
}

#[test]
fn strict_mode_returns_conversion_error() {
    let marshaller = Marshaller::builder().strict().build();
    let err = marshaller
        .unmarshal(&bag(&[("Age", Value::from("thirty"))]), &person())
        .unwrap_err();
    assert!(err.is_conversion());
    match err {
        Error::Conversion(c) => {
            assert_eq!(c.field, "Age");
            assert_eq!(c.expected, "Int32");
            assert_eq!(c.actual, "String");
        }
        other => panic!("expected conversion error, got {:?}", other),
    }
}

#[test]
fn dynamic_records_normalize_and_recognize_shapes() {
    let json = r#"{
        "FirstName": "Dana",
        "HomeLocation": {"Latitude": 1.5, "Longitude": 2.5},
        "Phone": {"input": "+31 20 1234567", "internationalFormatted": "+31 20 123 4567", "valid": true},
        "Profile": {"Score": 9, "Flags": [true, false]}
    }"#;
    let bag = strata_client::strata_client_wire::decode_json(json).unwrap();
    let record = Marshaller::new().unmarshal_dynamic(&bag);

    assert_eq!(record.keys().collect::<Vec<_>>(), vec!["firstName", "homeLocation", "phone", "profile"]);
    assert_eq!(record.get_geo("homeLocation"), Some(GeoCoordinate::new(1.5, 2.5)));
    let phone = record.get_phone("phone").unwrap();
    assert_eq!(phone.international_formatted.as_deref(), Some("+31 20 123 4567"));
    assert_eq!(phone.valid, Some(true));
    let profile = record.get_record("profile").unwrap();
    assert_eq!(profile.get_i64("score"), Some(9));
    assert_eq!(profile.get_list("flags").map(|f| f.len()), Some(2));
}
