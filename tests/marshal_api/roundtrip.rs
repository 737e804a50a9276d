//! Round-trip properties
//!
//! For objects made only of native fields, hydrating a flattened map and
//! flattening again reproduces the map exactly, with or without a JSON hop.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use std::sync::Arc;
use strata_client::prelude::*;
use uuid::Uuid;

fn sample() -> Arc<TypeDescriptor> {
    let color = EnumDescriptor::new("Color", [("Red", 0), ("Green", 1), ("Blue", 2)]);
    TypeDescriptor::builder("Sample")
        .field("Flag", FieldKind::Bool)
        .field("Tiny", FieldKind::Int8)
        .field("Small", FieldKind::UInt16)
        .field("Count", FieldKind::Int32)
        .field("Big", FieldKind::Int64)
        .field("Unsigned", FieldKind::UInt32)
        .field("Wide", FieldKind::UInt64)
        .field("Ratio", FieldKind::Float32)
        .field("Weight", FieldKind::Float64)
        .field("Label", FieldKind::Text)
        .field("When", FieldKind::Date)
        .field("Id", FieldKind::Uuid)
        .field("Home", FieldKind::Uri)
        .field("At", FieldKind::Geo)
        .field("Phone", FieldKind::Phone)
        .field("Data", FieldKind::Blob)
        .field("Color", FieldKind::Enum(color))
        .field("Scores", FieldKind::list(FieldKind::Int32))
        .field("Names", FieldKind::list(FieldKind::Text))
        .field("Maybe", FieldKind::nullable(FieldKind::Int16))
        .build()
}

fn finite_f64() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("finite", |f| f.is_finite())
}

fn finite_f32() -> impl Strategy<Value = f32> {
    any::<f32>().prop_filter("finite", |f| f.is_finite())
}

prop_compose! {
    fn numbers()(
        flag in any::<bool>(),
        tiny in any::<i8>(),
        small in any::<u16>(),
        count in any::<i32>(),
        big in any::<i64>(),
        unsigned in any::<u32>(),
        wide in 0..=i64::MAX as u64,
        ratio in finite_f32(),
        weight in finite_f64(),
    ) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("Flag", flag.into()),
            ("Tiny", tiny.into()),
            ("Small", small.into()),
            ("Count", count.into()),
            ("Big", big.into()),
            ("Unsigned", unsigned.into()),
            ("Wide", wide.into()),
            ("Ratio", ratio.into()),
            ("Weight", weight.into()),
        ]
    }
}

prop_compose! {
    fn texts()(
        label in ".*",
        secs in 0i64..4_102_444_800,
        nanos in 0u32..1_000_000_000,
        id in any::<u128>(),
        path in "[a-z0-9]{0,12}",
        lat in -90.0f64..90.0,
        lon in -180.0f64..180.0,
        phone in "[0-9 +]{1,15}",
        country in proptest::option::of("[A-Z]{2}"),
        data in proptest::collection::vec(any::<u8>(), 0..64),
    ) -> Vec<(&'static str, FieldValue)> {
        let mut number = PhoneNumber::new(phone);
        number.default_country = country;
        vec![
            ("Label", label.into()),
            ("When", Utc.timestamp_opt(secs, nanos).unwrap().into()),
            ("Id", Uuid::from_u128(id).into()),
            ("Home", url::Url::parse(&format!("https://example.com/{}", path)).unwrap().into()),
            ("At", GeoCoordinate::new(lat, lon).into()),
            ("Phone", number.into()),
            ("Data", FieldValue::Blob(data)),
        ]
    }
}

prop_compose! {
    fn collections()(
        color in 0usize..3,
        scores in proptest::collection::vec(any::<i32>(), 0..16),
        names in proptest::collection::vec("[a-zA-Z]{0,8}", 0..8),
        maybe in proptest::option::of(any::<i16>()),
    ) -> Vec<(&'static str, FieldValue)> {
        let names: Vec<FieldValue> = names.into_iter().map(FieldValue::from).collect();
        vec![
            ("Color", FieldValue::Enum(EnumValue::new(["Red", "Green", "Blue"][color], color as i64))),
            ("Scores", FieldValue::list(scores)),
            ("Names", FieldValue::List(names)),
            ("Maybe", maybe.into()),
        ]
    }
}

fn build(fields: Vec<Vec<(&'static str, FieldValue)>>) -> Instance {
    let mut instance = Instance::new(&sample());
    for (name, value) in fields.into_iter().flatten() {
        instance.set(name, value).unwrap();
    }
    instance
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn flatten_unmarshal_flatten_is_idempotent(
        a in numbers(),
        b in texts(),
        c in collections(),
    ) {
        let descriptor = sample();
        let original = build(vec![a, b, c]);
        let marshaller = Marshaller::new();

        let first = marshaller.flatten(&original).unwrap();
        let hydrated = marshaller.unmarshal_with_report(&first, &descriptor).unwrap();
        prop_assert!(hydrated.is_complete(), "skipped: {:?}", hydrated.skipped);
        let second = marshaller.flatten(&hydrated.instance).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&hydrated.instance, &original);
    }

    #[test]
    fn json_hop_preserves_the_map(
        a in numbers(),
        b in texts(),
        c in collections(),
    ) {
        let descriptor = sample();
        let original = build(vec![a, b, c]);
        let marshaller = Marshaller::new();

        let json = marshaller.to_json(&original).unwrap();
        let back = marshaller.from_json(&json, &descriptor).unwrap();
        prop_assert_eq!(marshaller.flatten(&back).unwrap(), marshaller.flatten(&original).unwrap());
    }
}

#[test]
fn record_round_trip() {
    let person = crate::fixtures::Person {
        name: "Eve".into(),
        age: -4,
        location: Some(GeoCoordinate::new(-1.25, 3.5)),
        tags: vec!["t".into()],
    };
    let marshaller = Marshaller::new();
    let bag = marshaller.flatten_record(&person).unwrap();
    let back: crate::fixtures::Person = marshaller.unmarshal_record(&bag).unwrap();
    assert_eq!(back, person);
}
