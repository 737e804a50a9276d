//! Property values for the REST wire shape
//!
//! [`Value`] is the closed set of shapes a property can take once it has been
//! flattened for the wire. [`PropertyBag`] is the ordered, string-keyed map of
//! those values. Together they mirror JSON exactly:
//!
//! | Value | JSON |
//! |-------|------|
//! | Null | `null` |
//! | Bool | `true`/`false` |
//! | Int | integer number |
//! | Float | number |
//! | String | `"..."` |
//! | Array | `[...]` |
//! | Object | `{...}` |
//!
//! ## Equality Rules
//!
//! - Different variants are NEVER equal (no coercion): `Int(1) != Float(1.0)`
//! - Float uses IEEE-754 equality: `NaN != NaN`, `-0.0 == 0.0`
//! - Bag equality is order-insensitive, key lookups are exact

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single property value
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// JSON null / absence of value
    Null,

    /// Boolean true or false
    Bool(bool),

    /// 64-bit signed integer; every integer width is widened to this
    Int(i64),

    /// 64-bit IEEE-754 floating point; every float width is widened to this
    Float(f64),

    /// UTF-8 string (also carries dates, UUIDs, URIs and enum names)
    String(String),

    /// Ordered sequence of values
    Array(Vec<Value>),

    /// Nested property bag
    Object(PropertyBag),
}

impl Value {
    /// Returns the type name as a string (for error messages)
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
        }
    }

    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as i64
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as f64
    ///
    /// Integers are NOT converted; use the coercion table for that.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get as string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as array slice
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Try to get as nested bag
    pub fn as_object(&self) -> Option<&PropertyBag> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Numeric view used when recognizing nested shapes (`Int` or `Float`)
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            // IEEE-754: NaN != NaN, -0.0 == 0.0
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Array(values)
    }
}

impl From<PropertyBag> for Value {
    fn from(bag: PropertyBag) -> Self {
        Value::Object(bag)
    }
}

/// Ordered string-keyed map of property values
///
/// Insertion order is preserved so that a flattened object lists its
/// properties in declaration order. Writers keep key case as given; readers
/// use [`PropertyBag::get_ignore_case`] to match field names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyBag {
    entries: IndexMap<String, Value>,
}

impl PropertyBag {
    /// Create an empty bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty bag with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        PropertyBag {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Insert a value, returning the previous value under the same key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Exact-key lookup
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Field-name lookup: exact match first, then the first key that matches
    /// case-insensitively
    pub fn get_ignore_case(&self, key: &str) -> Option<(&str, &Value)> {
        if let Some((k, v)) = self.entries.get_key_value(key) {
            return Some((k.as_str(), v));
        }
        let folded = key.to_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| k.to_lowercase() == folded)
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Check whether an exact key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove a key, keeping the order of the remaining entries
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the bag has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for PropertyBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        PropertyBag {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for PropertyBag {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
