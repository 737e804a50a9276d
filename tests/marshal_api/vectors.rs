//! Vector encoding through the facade

use strata_client::prelude::*;

#[test]
fn test_matrix_layout() {
    let rows: Vec<Vec<f32>> = (0..3)
        .map(|r| (0..4).map(|c| (r * 4 + c) as f32).collect())
        .collect();
    let vector = VectorValue::named("colbert", VectorData::Float32(Shape::Multi(rows)));

    let marshaller = Marshaller::new();
    let bytes = marshaller.encode_vector(&vector).unwrap();
    assert_eq!(bytes.len(), 2 + 3 * 4 * 4);
    assert_eq!(&bytes[..2], &[4, 0]);
    assert_eq!(&bytes[2..6], &0f32.to_le_bytes());
    assert_eq!(&bytes[46..], &11f32.to_le_bytes());

    let back = marshaller
        .decode_vector(Some("colbert".into()), &bytes, ElementKind::Float32, true)
        .unwrap();
    assert_eq!(back, vector);
}

#[test]
fn test_single_vector_has_no_header() {
    let vector = VectorValue::new(VectorData::Int16(Shape::Single(vec![1, -2, 300])));
    let marshaller = Marshaller::new();
    let bytes = marshaller.encode_vector(&vector).unwrap();
    assert_eq!(bytes, vec![1, 0, 0xFE, 0xFF, 0x2C, 0x01]);
    let back = marshaller.decode_vector(None, &bytes, ElementKind::Int16, false).unwrap();
    assert_eq!(back, vector);
}

#[test]
fn test_unsupported_kinds_are_rejected() {
    let marshaller = Marshaller::new();
    let vector = VectorValue::new(VectorData::UInt32(Shape::Single(vec![1, 2])));
    let err = marshaller.encode_vector(&vector).unwrap_err();
    assert!(err.is_unsupported_type());
    assert!(err.to_string().contains("UInt32"));

    let err = marshaller
        .decode_vector(None, &[0u8; 4], ElementKind::Int8, false)
        .unwrap_err();
    assert!(err.is_unsupported_type());
}

#[test]
fn test_malformed_payloads() {
    let marshaller = Marshaller::new();
    let err = marshaller
        .decode_vector(None, &[0u8; 5], ElementKind::Float32, false)
        .unwrap_err();
    assert!(err.is_vector());

    let ragged = VectorValue::new(VectorData::Float64(Shape::Multi(vec![
        vec![1.0, 2.0],
        vec![3.0],
    ])));
    let err = marshaller.encode_vector(&ragged).unwrap_err();
    assert!(err.is_vector());

    let hollow = VectorValue::new(VectorData::Int32(Shape::Multi(vec![vec![], vec![]])));
    let err = marshaller.encode_vector(&hollow).unwrap_err();
    assert!(err.is_vector());
    assert!(err.to_string().contains("2 rows of width 0"));
}
