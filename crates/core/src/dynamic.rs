//! Schema-less records
//!
//! A [`DynamicRecord`] is what a property bag hydrates into when the caller
//! has no type for it. It is an ordered map with typed accessors; nested
//! geo-coordinate and phone-number shapes are already converted to their
//! domain types by the time they land here.

use crate::object::FieldValue;
use crate::types::{GeoCoordinate, PhoneNumber};
use indexmap::IndexMap;

/// Ordered, string-keyed record of field values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DynamicRecord {
    entries: IndexMap<String, FieldValue>,
}

impl DynamicRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the previous value under the same key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Option<FieldValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Raw lookup
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.get(key)
    }

    /// Text entry
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_text)
    }

    /// Integer entry, widened to `i64`
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(FieldValue::as_i64)
    }

    /// Float entry; integers are widened
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        let value = self.get(key)?;
        value.as_f64().or_else(|| value.as_i64().map(|i| i as f64))
    }

    /// Boolean entry
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Geo-coordinate entry
    pub fn get_geo(&self, key: &str) -> Option<GeoCoordinate> {
        match self.get(key)? {
            FieldValue::Geo(g) => Some(*g),
            _ => None,
        }
    }

    /// Phone-number entry
    pub fn get_phone(&self, key: &str) -> Option<&PhoneNumber> {
        match self.get(key)? {
            FieldValue::Phone(p) => Some(p),
            _ => None,
        }
    }

    /// Nested record entry
    pub fn get_record(&self, key: &str) -> Option<&DynamicRecord> {
        match self.get(key)? {
            FieldValue::Dynamic(r) => Some(r),
            _ => None,
        }
    }

    /// List entry
    pub fn get_list(&self, key: &str) -> Option<&[FieldValue]> {
        match self.get(key)? {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the record has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
