//! gRPC batch-property message
//!
//! Scalars and nested objects travel in one `non_ref_properties` struct. Every
//! array-valued property gets exactly one typed entry, selected by element
//! kind:
//!
//! | Elements | Entry | Payload |
//! |----------|-------|---------|
//! | bool | `BooleanArrayProperties` | `Vec<bool>` |
//! | integers | `IntArrayProperties` | `Vec<i64>` |
//! | floats | `NumberArrayProperties` | little-endian `f64` bytes |
//! | text, dates, URIs, enums | `TextArrayProperties` | `Vec<String>` |
//! | UUIDs | `ReferenceArrayProperties` | `Vec<String>` |
//! | objects | `ObjectArrayProperties` | `Vec<BatchProperties>` |

use crate::vector::codec::{decode_single, encode_single};
use serde::{Deserialize, Serialize};
use strata_client_core::{PropertyBag, Result, Value};

/// Boolean array entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BooleanArrayProperties {
    /// Property name
    pub prop_name: String,
    /// Elements
    pub values: Vec<bool>,
}

/// 64-bit integer array entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntArrayProperties {
    /// Property name
    pub prop_name: String,
    /// Elements, widened to `i64`
    pub values: Vec<i64>,
}

/// Number array entry, carried as raw double bytes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberArrayProperties {
    /// Property name
    pub prop_name: String,
    /// Little-endian `f64` elements back to back
    pub values_bytes: Vec<u8>,
}

impl NumberArrayProperties {
    /// Build from doubles
    pub fn from_values(prop_name: impl Into<String>, values: &[f64]) -> Self {
        NumberArrayProperties {
            prop_name: prop_name.into(),
            values_bytes: encode_single(values),
        }
    }

    /// Decode the payload
    pub fn values(&self) -> Result<Vec<f64>> {
        decode_single(&self.values_bytes)
    }
}

/// Text array entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextArrayProperties {
    /// Property name
    pub prop_name: String,
    /// Elements
    pub values: Vec<String>,
}

/// Reference UUID array entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceArrayProperties {
    /// Property name
    pub prop_name: String,
    /// Canonical UUID strings
    pub uuids: Vec<String>,
}

/// Array of nested objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectArrayProperties {
    /// Property name
    pub prop_name: String,
    /// One nested message per element
    pub values: Vec<BatchProperties>,
}

/// Which typed entry carries an array property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayKind {
    /// `boolean_array_properties`
    Boolean,
    /// `int_array_properties`
    Int,
    /// `number_array_properties`
    Number,
    /// `text_array_properties`
    Text,
    /// `reference_array_properties`
    Reference,
    /// `object_array_properties`
    Object,
}

/// Batch-property message for one object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchProperties {
    /// Scalars and nested objects
    pub non_ref_properties: PropertyBag,
    /// Boolean arrays
    pub boolean_array_properties: Vec<BooleanArrayProperties>,
    /// Integer arrays
    pub int_array_properties: Vec<IntArrayProperties>,
    /// Number arrays
    pub number_array_properties: Vec<NumberArrayProperties>,
    /// Text arrays
    pub text_array_properties: Vec<TextArrayProperties>,
    /// Reference UUID arrays
    pub reference_array_properties: Vec<ReferenceArrayProperties>,
    /// Arrays of nested objects
    pub object_array_properties: Vec<ObjectArrayProperties>,
}

impl BatchProperties {
    /// Create an empty message
    pub fn new() -> Self {
        Self::default()
    }

    /// True if no property of any kind is present
    pub fn is_empty(&self) -> bool {
        self.non_ref_properties.is_empty()
            && self.boolean_array_properties.is_empty()
            && self.int_array_properties.is_empty()
            && self.number_array_properties.is_empty()
            && self.text_array_properties.is_empty()
            && self.reference_array_properties.is_empty()
            && self.object_array_properties.is_empty()
    }

    /// Which typed entry holds `prop_name`, if it is an array property
    pub fn array_kind(&self, prop_name: &str) -> Option<ArrayKind> {
        if self.boolean_array_properties.iter().any(|p| p.prop_name == prop_name) {
            Some(ArrayKind::Boolean)
        } else if self.int_array_properties.iter().any(|p| p.prop_name == prop_name) {
            Some(ArrayKind::Int)
        } else if self.number_array_properties.iter().any(|p| p.prop_name == prop_name) {
            Some(ArrayKind::Number)
        } else if self.text_array_properties.iter().any(|p| p.prop_name == prop_name) {
            Some(ArrayKind::Text)
        } else if self.reference_array_properties.iter().any(|p| p.prop_name == prop_name) {
            Some(ArrayKind::Reference)
        } else if self.object_array_properties.iter().any(|p| p.prop_name == prop_name) {
            Some(ArrayKind::Object)
        } else {
            None
        }
    }

    /// Nested scalar-struct entry by name
    pub fn nested(&self, prop_name: &str) -> Option<&PropertyBag> {
        self.non_ref_properties.get(prop_name).and_then(Value::as_object)
    }

    /// Object-array entry by name
    pub fn object_array(&self, prop_name: &str) -> Option<&[BatchProperties]> {
        self.object_array_properties
            .iter()
            .find(|p| p.prop_name == prop_name)
            .map(|p| p.values.as_slice())
    }

    /// Fold into a single struct, turning every typed array into a list
    ///
    /// Used when a whole message has to be nested under a scalar field.
    pub fn into_struct(self) -> Result<PropertyBag> {
        let mut bag = self.non_ref_properties;
        for p in self.boolean_array_properties {
            bag.insert(p.prop_name, p.values.into_iter().map(Value::Bool).collect::<Vec<_>>());
        }
        for p in self.int_array_properties {
            bag.insert(p.prop_name, p.values.into_iter().map(Value::Int).collect::<Vec<_>>());
        }
        for p in self.number_array_properties {
            let values = p.values()?;
            bag.insert(p.prop_name, values.into_iter().map(Value::Float).collect::<Vec<_>>());
        }
        for p in self.text_array_properties {
            bag.insert(p.prop_name, p.values.into_iter().map(Value::String).collect::<Vec<_>>());
        }
        for p in self.reference_array_properties {
            bag.insert(p.prop_name, p.uuids.into_iter().map(Value::String).collect::<Vec<_>>());
        }
        for p in self.object_array_properties {
            let values = p
                .values
                .into_iter()
                .map(|nested| nested.into_struct().map(Value::Object))
                .collect::<Result<Vec<_>>>()?;
            bag.insert(p.prop_name, values);
        }
        Ok(bag)
    }
}
