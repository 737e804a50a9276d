//! Typed objects
//!
//! An [`Instance`] is one caller record: a descriptor plus one [`FieldValue`]
//! per declared field, in declaration order. Nested objects are held through
//! [`SharedObject`], an `Arc<RwLock<Instance>>` whose pointer address is the
//! object's identity. That makes cyclic graphs representable and lets the
//! serializer tell "the same object again" apart from "an equal object".

use crate::dynamic::DynamicRecord;
use crate::error::{MarshalError, Result};
use crate::schema::{FieldDescriptor, TypeDescriptor};
use crate::types::{EnumValue, GeoCoordinate, PhoneNumber};
use chrono::{DateTime, Utc};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::fmt;
use std::sync::Arc;
use url::Url;
use uuid::Uuid;

/// Value held by a field of a typed object
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// No value
    Null,
    /// `bool`
    Bool(bool),
    /// `i8`
    I8(i8),
    /// `i16`
    I16(i16),
    /// `i32`
    I32(i32),
    /// `i64`
    I64(i64),
    /// `u8`
    U8(u8),
    /// `u16`
    U16(u16),
    /// `u32`
    U32(u32),
    /// `u64`
    U64(u64),
    /// `f32`
    F32(f32),
    /// `f64`
    F64(f64),
    /// UTF-8 text
    Text(String),
    /// Point in time
    Date(DateTime<Utc>),
    /// UUID
    Uuid(Uuid),
    /// Absolute URI
    Uri(Url),
    /// Geographic coordinate
    Geo(GeoCoordinate),
    /// Phone number
    Phone(PhoneNumber),
    /// Binary blob
    Blob(Vec<u8>),
    /// Enum variant
    Enum(EnumValue),
    /// Collection of values
    List(Vec<FieldValue>),
    /// Nested typed object
    Object(SharedObject),
    /// Nested schema-less record
    Dynamic(DynamicRecord),
}

impl FieldValue {
    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Variant name, for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "Null",
            FieldValue::Bool(_) => "Bool",
            FieldValue::I8(_) => "Int8",
            FieldValue::I16(_) => "Int16",
            FieldValue::I32(_) => "Int32",
            FieldValue::I64(_) => "Int64",
            FieldValue::U8(_) => "UInt8",
            FieldValue::U16(_) => "UInt16",
            FieldValue::U32(_) => "UInt32",
            FieldValue::U64(_) => "UInt64",
            FieldValue::F32(_) => "Float32",
            FieldValue::F64(_) => "Float64",
            FieldValue::Text(_) => "Text",
            FieldValue::Date(_) => "Date",
            FieldValue::Uuid(_) => "Uuid",
            FieldValue::Uri(_) => "Uri",
            FieldValue::Geo(_) => "Geo",
            FieldValue::Phone(_) => "Phone",
            FieldValue::Blob(_) => "Blob",
            FieldValue::Enum(_) => "Enum",
            FieldValue::List(_) => "List",
            FieldValue::Object(_) => "Object",
            FieldValue::Dynamic(_) => "Dynamic",
        }
    }

    /// Build a list from anything convertible
    pub fn list<T: Into<FieldValue>>(items: impl IntoIterator<Item = T>) -> Self {
        FieldValue::List(items.into_iter().map(Into::into).collect())
    }

    /// Integer view, widened to `i64`
    ///
    /// `None` for a `u64` above `i64::MAX`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::I8(v) => Some(i64::from(*v)),
            FieldValue::I16(v) => Some(i64::from(*v)),
            FieldValue::I32(v) => Some(i64::from(*v)),
            FieldValue::I64(v) => Some(*v),
            FieldValue::U8(v) => Some(i64::from(*v)),
            FieldValue::U16(v) => Some(i64::from(*v)),
            FieldValue::U32(v) => Some(i64::from(*v)),
            FieldValue::U64(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Float view, widened to `f64`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::F32(v) => Some(f64::from(*v)),
            FieldValue::F64(v) => Some(*v),
            _ => None,
        }
    }

    /// Text view
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Nested object view
    pub fn as_object(&self) -> Option<&SharedObject> {
        match self {
            FieldValue::Object(o) => Some(o),
            _ => None,
        }
    }
}

macro_rules! impl_from_for_field_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(v: $ty) -> Self {
                    FieldValue::$variant(v)
                }
            }
        )*
    };
}

impl_from_for_field_value! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => Text,
    DateTime<Utc> => Date,
    Uuid => Uuid,
    Url => Uri,
    GeoCoordinate => Geo,
    PhoneNumber => Phone,
    EnumValue => Enum,
    SharedObject => Object,
    DynamicRecord => Dynamic,
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

impl From<Instance> for FieldValue {
    fn from(instance: Instance) -> Self {
        FieldValue::Object(SharedObject::new(instance))
    }
}

/// One typed object
#[derive(Clone)]
pub struct Instance {
    descriptor: Arc<TypeDescriptor>,
    values: Vec<FieldValue>,
}

impl Instance {
    /// Zero-valued instance of `descriptor`
    pub fn new(descriptor: &Arc<TypeDescriptor>) -> Self {
        Instance {
            descriptor: Arc::clone(descriptor),
            values: descriptor
                .fields()
                .iter()
                .map(|f| f.kind.zero_value())
                .collect(),
        }
    }

    /// The schema of this object
    pub fn descriptor(&self) -> &Arc<TypeDescriptor> {
        &self.descriptor
    }

    /// Name of the type
    pub fn type_name(&self) -> &str {
        &self.descriptor.name
    }

    /// Current value of a field
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.descriptor.field_index(field).map(|i| &self.values[i])
    }

    /// Assign a field, validating the value against its declared kind
    pub fn set(&mut self, field: &str, value: impl Into<FieldValue>) -> Result<()> {
        let index = self
            .descriptor
            .field_index(field)
            .ok_or_else(|| MarshalError::UnknownField {
                type_name: self.descriptor.name.clone(),
                field: field.to_string(),
            })?;
        let value = value.into();
        let kind = &self.descriptor.fields()[index].kind;
        if !kind.accepts(&value) {
            return Err(MarshalError::FieldTypeMismatch {
                field: field.to_string(),
                expected: kind.type_name(),
                actual: value.kind_name(),
            });
        }
        self.values[index] = value;
        Ok(())
    }

    /// Builder-style [`Instance::set`]
    pub fn with(mut self, field: &str, value: impl Into<FieldValue>) -> Result<Self> {
        self.set(field, value)?;
        Ok(self)
    }

    /// Fields paired with their values, in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&FieldDescriptor, &FieldValue)> {
        self.descriptor.fields().iter().zip(self.values.iter())
    }

    /// Wrap into a shared, identity-carrying object
    pub fn into_shared(self) -> SharedObject {
        SharedObject::new(self)
    }
}

impl PartialEq for Instance {
    /// Field-wise equality; nested objects compare by identity
    fn eq(&self, other: &Self) -> bool {
        self.descriptor.name == other.descriptor.name && self.values == other.values
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(&self.descriptor.name);
        for (field, value) in self.fields() {
            s.field(&field.name, value);
        }
        s.finish()
    }
}

/// Opaque identity token of a [`SharedObject`]
///
/// Two tokens are equal iff they come from clones of the same `SharedObject`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectIdentity(usize);

struct ObjectCell {
    descriptor: Arc<TypeDescriptor>,
    state: RwLock<Instance>,
}

/// A nested object with stable identity
///
/// Cloning shares the object. Graphs with back-references are allowed; they
/// are never freed automatically, so build them only for the duration of a
/// marshalling call or break the cycle afterwards.
#[derive(Clone)]
pub struct SharedObject(Arc<ObjectCell>);

impl SharedObject {
    /// Share an instance
    pub fn new(instance: Instance) -> Self {
        SharedObject(Arc::new(ObjectCell {
            descriptor: Arc::clone(&instance.descriptor),
            state: RwLock::new(instance),
        }))
    }

    /// Identity token (stable pointer of the shared cell)
    pub fn identity(&self) -> ObjectIdentity {
        ObjectIdentity(Arc::as_ptr(&self.0) as usize)
    }

    /// Name of the object's type, without locking
    pub fn type_name(&self) -> &str {
        &self.0.descriptor.name
    }

    /// Schema of the object, without locking
    pub fn descriptor(&self) -> &Arc<TypeDescriptor> {
        &self.0.descriptor
    }

    /// Shared read access
    ///
    /// Recursive so that a thread already reading an ancestor can read again
    /// even while a writer is queued.
    pub fn read(&self) -> RwLockReadGuard<'_, Instance> {
        self.0.state.read_recursive()
    }

    /// Exclusive write access
    pub fn write(&self) -> RwLockWriteGuard<'_, Instance> {
        self.0.state.write()
    }

    /// Assign a field on the shared instance
    pub fn set(&self, field: &str, value: impl Into<FieldValue>) -> Result<()> {
        self.write().set(field, value)
    }

    /// True if both handles point to the same object
    pub fn ptr_eq(&self, other: &SharedObject) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for SharedObject {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for SharedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedObject({}@{:#x})", self.type_name(), self.identity().0)
    }
}
