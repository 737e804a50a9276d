//! Schema descriptors
//!
//! A [`TypeDescriptor`] is built once per caller type and lists its fields in
//! declaration order. Each field carries a [`FieldKind`], the tag every
//! marshalling decision dispatches on. Nothing is discovered at runtime.
//!
//! Self-referential types (a tree node whose `parent` is another node) are
//! built with [`TypeDescriptor::recursive`], which hands the field builder a
//! weak [`TypeRef`] to the descriptor under construction.

use crate::object::FieldValue;
use crate::types::EnumValue;
use std::fmt;
use std::sync::{Arc, Weak};

/// Kind tag for a field
#[derive(Clone, PartialEq)]
pub enum FieldKind {
    /// `bool`
    Bool,
    /// `i8`
    Int8,
    /// `i16`
    Int16,
    /// `i32`
    Int32,
    /// `i64`
    Int64,
    /// `u8`
    UInt8,
    /// `u16`
    UInt16,
    /// `u32`
    UInt32,
    /// `u64`; written as `Int` when it fits in `i64`
    UInt64,
    /// `f32`
    Float32,
    /// `f64`
    Float64,
    /// UTF-8 text
    Text,
    /// Point in time, UTC
    Date,
    /// UUID
    Uuid,
    /// Absolute URI
    Uri,
    /// Geographic coordinate
    Geo,
    /// Phone number
    Phone,
    /// Binary blob
    Blob,
    /// Enumeration with named variants
    Enum(Arc<EnumDescriptor>),
    /// Optional wrapper around another kind
    Nullable(Box<FieldKind>),
    /// Homogeneous collection
    List(Box<FieldKind>),
    /// Collection without a declared element kind
    UntypedList,
    /// Nested typed object
    Object(TypeRef),
    /// Schema-less nested record
    Dynamic,
}

impl FieldKind {
    /// Shorthand for `Nullable(Box::new(kind))`
    pub fn nullable(kind: FieldKind) -> Self {
        FieldKind::Nullable(Box::new(kind))
    }

    /// Shorthand for `List(Box::new(kind))`
    pub fn list(kind: FieldKind) -> Self {
        FieldKind::List(Box::new(kind))
    }

    /// Shorthand for a nested object of a fully built type
    pub fn object(descriptor: &Arc<TypeDescriptor>) -> Self {
        FieldKind::Object(TypeRef::Strong(Arc::clone(descriptor)))
    }

    /// Stable name used in error messages
    pub fn type_name(&self) -> String {
        match self {
            FieldKind::Bool => "Bool".into(),
            FieldKind::Int8 => "Int8".into(),
            FieldKind::Int16 => "Int16".into(),
            FieldKind::Int32 => "Int32".into(),
            FieldKind::Int64 => "Int64".into(),
            FieldKind::UInt8 => "UInt8".into(),
            FieldKind::UInt16 => "UInt16".into(),
            FieldKind::UInt32 => "UInt32".into(),
            FieldKind::UInt64 => "UInt64".into(),
            FieldKind::Float32 => "Float32".into(),
            FieldKind::Float64 => "Float64".into(),
            FieldKind::Text => "Text".into(),
            FieldKind::Date => "Date".into(),
            FieldKind::Uuid => "Uuid".into(),
            FieldKind::Uri => "Uri".into(),
            FieldKind::Geo => "Geo".into(),
            FieldKind::Phone => "Phone".into(),
            FieldKind::Blob => "Blob".into(),
            FieldKind::Enum(e) => format!("Enum<{}>", e.name),
            FieldKind::Nullable(inner) => format!("Nullable<{}>", inner.type_name()),
            FieldKind::List(inner) => format!("List<{}>", inner.type_name()),
            FieldKind::UntypedList => "UntypedList".into(),
            FieldKind::Object(t) => format!("Object<{}>", t.name()),
            FieldKind::Dynamic => "Dynamic".into(),
        }
    }

    /// True for kinds whose zero value is not null
    pub fn is_value_kind(&self) -> bool {
        matches!(
            self,
            FieldKind::Bool
                | FieldKind::Int8
                | FieldKind::Int16
                | FieldKind::Int32
                | FieldKind::Int64
                | FieldKind::UInt8
                | FieldKind::UInt16
                | FieldKind::UInt32
                | FieldKind::UInt64
                | FieldKind::Float32
                | FieldKind::Float64
                | FieldKind::Enum(_)
        )
    }

    /// Value a freshly constructed instance holds for this kind
    pub fn zero_value(&self) -> FieldValue {
        match self {
            FieldKind::Bool => FieldValue::Bool(false),
            FieldKind::Int8 => FieldValue::I8(0),
            FieldKind::Int16 => FieldValue::I16(0),
            FieldKind::Int32 => FieldValue::I32(0),
            FieldKind::Int64 => FieldValue::I64(0),
            FieldKind::UInt8 => FieldValue::U8(0),
            FieldKind::UInt16 => FieldValue::U16(0),
            FieldKind::UInt32 => FieldValue::U32(0),
            FieldKind::UInt64 => FieldValue::U64(0),
            FieldKind::Float32 => FieldValue::F32(0.0),
            FieldKind::Float64 => FieldValue::F64(0.0),
            FieldKind::Enum(e) => e
                .variants
                .first()
                .cloned()
                .map(FieldValue::Enum)
                .unwrap_or(FieldValue::Null),
            _ => FieldValue::Null,
        }
    }

    /// Whether `value` may be stored in a field of this kind
    pub fn accepts(&self, value: &FieldValue) -> bool {
        match (self, value) {
            (FieldKind::Nullable(inner), v) => v.is_null() || inner.accepts(v),
            (kind, FieldValue::Null) => !kind.is_value_kind(),
            (FieldKind::Bool, FieldValue::Bool(_))
            | (FieldKind::Int8, FieldValue::I8(_))
            | (FieldKind::Int16, FieldValue::I16(_))
            | (FieldKind::Int32, FieldValue::I32(_))
            | (FieldKind::Int64, FieldValue::I64(_))
            | (FieldKind::UInt8, FieldValue::U8(_))
            | (FieldKind::UInt16, FieldValue::U16(_))
            | (FieldKind::UInt32, FieldValue::U32(_))
            | (FieldKind::UInt64, FieldValue::U64(_))
            | (FieldKind::Float32, FieldValue::F32(_))
            | (FieldKind::Float64, FieldValue::F64(_))
            | (FieldKind::Text, FieldValue::Text(_))
            | (FieldKind::Date, FieldValue::Date(_))
            | (FieldKind::Uuid, FieldValue::Uuid(_))
            | (FieldKind::Uri, FieldValue::Uri(_))
            | (FieldKind::Geo, FieldValue::Geo(_))
            | (FieldKind::Phone, FieldValue::Phone(_))
            | (FieldKind::Blob, FieldValue::Blob(_))
            | (FieldKind::UntypedList, FieldValue::List(_))
            | (FieldKind::Dynamic, FieldValue::Dynamic(_)) => true,
            (FieldKind::Enum(e), FieldValue::Enum(v)) => e.contains(v),
            (FieldKind::List(element), FieldValue::List(items)) => {
                items.iter().all(|item| element.accepts(item))
            }
            (FieldKind::Object(t), FieldValue::Object(obj)) => obj.type_name() == t.name(),
            _ => false,
        }
    }
}

impl fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name())
    }
}

/// Reference from a field to a nested type
///
/// `Weak` only appears inside self-referential descriptors built by
/// [`TypeDescriptor::recursive`]; it stays valid for as long as the outer
/// descriptor is alive.
#[derive(Clone)]
pub enum TypeRef {
    /// Owned reference to a fully built descriptor
    Strong(Arc<TypeDescriptor>),
    /// Back-reference into the descriptor under construction
    Weak(Weak<TypeDescriptor>, String),
}

impl TypeRef {
    /// Resolve to the descriptor, if it is still alive
    pub fn resolve(&self) -> Option<Arc<TypeDescriptor>> {
        match self {
            TypeRef::Strong(arc) => Some(Arc::clone(arc)),
            TypeRef::Weak(weak, _) => weak.upgrade(),
        }
    }

    /// Name of the referenced type (available even when unresolvable)
    pub fn name(&self) -> &str {
        match self {
            TypeRef::Strong(arc) => &arc.name,
            TypeRef::Weak(_, name) => name,
        }
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeRef({})", self.name())
    }
}

/// One declared field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Field name as written to the wire
    pub name: String,
    /// Kind tag
    pub kind: FieldKind,
    /// Serializers only visit readable fields
    pub readable: bool,
    /// Deserializers only assign writable fields
    pub writable: bool,
}

impl FieldDescriptor {
    /// A readable and writable field
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        FieldDescriptor {
            name: name.into(),
            kind,
            readable: true,
            writable: true,
        }
    }

    /// Mark the field as not writable (computed on the client)
    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    /// Mark the field as not readable (never sent)
    pub fn write_only(mut self) -> Self {
        self.readable = false;
        self
    }
}

/// Explicit schema for a caller-defined type
#[derive(Debug, PartialEq)]
pub struct TypeDescriptor {
    /// Type name, used in error messages and object-kind checks
    pub name: String,
    fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    /// Build a descriptor from its fields
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Arc<Self> {
        Arc::new(TypeDescriptor {
            name: name.into(),
            fields,
        })
    }

    /// Start a builder
    pub fn builder(name: impl Into<String>) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Build a self-referential descriptor
    ///
    /// `build` receives a [`TypeRef`] to the descriptor being built, for use
    /// in `FieldKind::Object` of its own fields.
    pub fn recursive(
        name: impl Into<String>,
        build: impl FnOnce(TypeRef) -> Vec<FieldDescriptor>,
    ) -> Arc<Self> {
        let name = name.into();
        Arc::new_cyclic(|weak| {
            let fields = build(TypeRef::Weak(weak.clone(), name.clone()));
            TypeDescriptor { name, fields }
        })
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Position of a field (exact name)
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Lookup a field (exact name)
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Builder for [`TypeDescriptor`]
#[derive(Debug)]
pub struct TypeDescriptorBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl TypeDescriptorBuilder {
    /// Add a readable and writable field
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldDescriptor::new(name, kind));
        self
    }

    /// Add a prepared field descriptor
    pub fn with(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Finish the descriptor
    pub fn build(self) -> Arc<TypeDescriptor> {
        TypeDescriptor::new(self.name, self.fields)
    }
}

/// Enumeration schema: named variants with their numeric values
#[derive(Debug, PartialEq)]
pub struct EnumDescriptor {
    /// Enum name
    pub name: String,
    /// Variants in declaration order
    pub variants: Vec<EnumValue>,
}

impl EnumDescriptor {
    /// Build from `(name, value)` pairs
    pub fn new<N: Into<String>>(
        name: impl Into<String>,
        variants: impl IntoIterator<Item = (N, i64)>,
    ) -> Arc<Self> {
        Arc::new(EnumDescriptor {
            name: name.into(),
            variants: variants
                .into_iter()
                .map(|(n, v)| EnumValue::new(n, v))
                .collect(),
        })
    }

    /// Case-insensitive variant lookup by name
    pub fn by_name(&self, name: &str) -> Option<&EnumValue> {
        self.variants
            .iter()
            .find(|v| v.name == name)
            .or_else(|| self.variants.iter().find(|v| v.name.eq_ignore_ascii_case(name)))
    }

    /// Variant lookup by numeric value
    pub fn by_value(&self, value: i64) -> Option<&EnumValue> {
        self.variants.iter().find(|v| v.value == value)
    }

    /// Whether `value` is one of the declared variants
    pub fn contains(&self, value: &EnumValue) -> bool {
        self.variants.iter().any(|v| v == value)
    }
}
