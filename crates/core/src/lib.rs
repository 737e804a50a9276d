//! Core types for the Strata client marshalling layer
//!
//! This crate defines the data model every other client crate speaks:
//!
//! - [`Value`] and [`PropertyBag`]: the JSON-like property map sent over REST
//! - [`FieldKind`] / [`TypeDescriptor`]: explicit schema descriptors that
//!   replace runtime type inspection
//! - [`classify`]: decides whether a field kind is wire-native or composite
//! - [`Instance`] / [`SharedObject`]: typed objects, possibly cyclic
//! - [`DynamicRecord`]: schema-less records produced from property bags
//! - [`MarshalError`] / [`ConversionError`]: the error taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classify;
pub mod dynamic;
pub mod error;
pub mod object;
pub mod schema;
pub mod types;
pub mod value;

pub use classify::{classify, Classification};
pub use dynamic::DynamicRecord;
pub use error::{ConversionError, MarshalError, Result};
pub use object::{FieldValue, Instance, ObjectIdentity, SharedObject};
pub use schema::{EnumDescriptor, FieldDescriptor, FieldKind, TypeDescriptor};
pub use types::{EnumValue, GeoCoordinate, PhoneNumber};
pub use value::{PropertyBag, Value};
