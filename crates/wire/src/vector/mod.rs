//! Binary vector encoding
//!
//! Vectors cross the wire as raw little-endian elements. A single vector has
//! no header. A multi-vector (several equal-length rows under one name) is
//! prefixed with its row width as a 2-byte little-endian integer; the row
//! count is implied by the remaining length.
//!
//! Element types implement [`VectorElement`]. Only the supported kinds do, so
//! the generic functions in [`codec`] cannot fail on kind. [`VectorData`]
//! carries runtime-tagged data and may hold kinds the server does not accept;
//! encoding those raises `UnsupportedType`.

pub mod codec;

pub use codec::{
    decode_multi, decode_multi_as, decode_single, decode_single_as, encode, encode_multi,
    encode_single, MULTI_HEADER_LEN,
};

use byteorder::{ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric element kind of a vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// `i8` (not accepted by the server)
    Int8,
    /// `i16`
    Int16,
    /// `i32`
    Int32,
    /// `i64`
    Int64,
    /// `u8`
    Byte,
    /// `u16` (not accepted by the server)
    UInt16,
    /// `u32` (not accepted by the server)
    UInt32,
    /// `u64` (not accepted by the server)
    UInt64,
    /// `f32`
    Float32,
    /// `f64`
    Float64,
    /// `bool`, one byte per element
    Bool,
}

impl ElementKind {
    /// Human-readable name for errors
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Int8 => "Int8",
            ElementKind::Int16 => "Int16",
            ElementKind::Int32 => "Int32",
            ElementKind::Int64 => "Int64",
            ElementKind::Byte => "Byte",
            ElementKind::UInt16 => "UInt16",
            ElementKind::UInt32 => "UInt32",
            ElementKind::UInt64 => "UInt64",
            ElementKind::Float32 => "Float32",
            ElementKind::Float64 => "Float64",
            ElementKind::Bool => "Bool",
        }
    }

    /// Encoded width in bytes, `None` for kinds without a wire mapping
    pub fn size(&self) -> Option<usize> {
        match self {
            ElementKind::Int16 => Some(2),
            ElementKind::Int32 | ElementKind::Float32 => Some(4),
            ElementKind::Int64 | ElementKind::Float64 => Some(8),
            ElementKind::Byte | ElementKind::Bool => Some(1),
            ElementKind::Int8 | ElementKind::UInt16 | ElementKind::UInt32 | ElementKind::UInt64 => {
                None
            }
        }
    }

    /// Whether the codec can encode this kind
    pub fn is_supported(&self) -> bool {
        self.size().is_some()
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fixed-width element the codec can read and write
pub trait VectorElement: Copy + PartialEq + fmt::Debug + Sized + 'static {
    /// Kind tag
    const KIND: ElementKind;
    /// Encoded width in bytes
    const SIZE: usize;

    /// Write into exactly `SIZE` bytes
    fn put(self, out: &mut [u8]);

    /// Read from exactly `SIZE` bytes
    fn get(bytes: &[u8]) -> Self;
}

macro_rules! impl_vector_element {
    ($ty:ty, $kind:ident, $size:expr, $write:ident, $read:ident) => {
        impl VectorElement for $ty {
            const KIND: ElementKind = ElementKind::$kind;
            const SIZE: usize = $size;

            fn put(self, out: &mut [u8]) {
                LittleEndian::$write(out, self);
            }

            fn get(bytes: &[u8]) -> Self {
                LittleEndian::$read(bytes)
            }
        }
    };
}

impl_vector_element!(i16, Int16, 2, write_i16, read_i16);
impl_vector_element!(i32, Int32, 4, write_i32, read_i32);
impl_vector_element!(i64, Int64, 8, write_i64, read_i64);
impl_vector_element!(f32, Float32, 4, write_f32, read_f32);
impl_vector_element!(f64, Float64, 8, write_f64, read_f64);

impl VectorElement for u8 {
    const KIND: ElementKind = ElementKind::Byte;
    const SIZE: usize = 1;

    fn put(self, out: &mut [u8]) {
        out[0] = self;
    }

    fn get(bytes: &[u8]) -> Self {
        bytes[0]
    }
}

impl VectorElement for bool {
    const KIND: ElementKind = ElementKind::Bool;
    const SIZE: usize = 1;

    fn put(self, out: &mut [u8]) {
        out[0] = u8::from(self);
    }

    fn get(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }
}

/// Single vector or multi-vector of one element type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape<T> {
    /// Flat sequence
    Single(Vec<T>),
    /// Rectangular matrix, row-major
    Multi(Vec<Vec<T>>),
}

impl<T> Shape<T> {
    /// True for the multi-vector shape
    pub fn is_multi(&self) -> bool {
        matches!(self, Shape::Multi(_))
    }

    /// Element count (single) or row count (multi)
    pub fn len(&self) -> usize {
        match self {
            Shape::Single(v) => v.len(),
            Shape::Multi(rows) => rows.len(),
        }
    }

    /// True if there are no elements / rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Runtime-tagged vector payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VectorData {
    /// `i8` elements
    Int8(Shape<i8>),
    /// `i16` elements
    Int16(Shape<i16>),
    /// `i32` elements
    Int32(Shape<i32>),
    /// `i64` elements
    Int64(Shape<i64>),
    /// `u8` elements
    Byte(Shape<u8>),
    /// `u16` elements
    UInt16(Shape<u16>),
    /// `u32` elements
    UInt32(Shape<u32>),
    /// `u64` elements
    UInt64(Shape<u64>),
    /// `f32` elements
    Float32(Shape<f32>),
    /// `f64` elements
    Float64(Shape<f64>),
    /// `bool` elements
    Bool(Shape<bool>),
}

macro_rules! for_each_shape {
    ($data:expr, $shape:ident => $body:expr) => {
        match $data {
            VectorData::Int8($shape) => $body,
            VectorData::Int16($shape) => $body,
            VectorData::Int32($shape) => $body,
            VectorData::Int64($shape) => $body,
            VectorData::Byte($shape) => $body,
            VectorData::UInt16($shape) => $body,
            VectorData::UInt32($shape) => $body,
            VectorData::UInt64($shape) => $body,
            VectorData::Float32($shape) => $body,
            VectorData::Float64($shape) => $body,
            VectorData::Bool($shape) => $body,
        }
    };
}

impl VectorData {
    /// Element kind tag
    pub fn kind(&self) -> ElementKind {
        match self {
            VectorData::Int8(_) => ElementKind::Int8,
            VectorData::Int16(_) => ElementKind::Int16,
            VectorData::Int32(_) => ElementKind::Int32,
            VectorData::Int64(_) => ElementKind::Int64,
            VectorData::Byte(_) => ElementKind::Byte,
            VectorData::UInt16(_) => ElementKind::UInt16,
            VectorData::UInt32(_) => ElementKind::UInt32,
            VectorData::UInt64(_) => ElementKind::UInt64,
            VectorData::Float32(_) => ElementKind::Float32,
            VectorData::Float64(_) => ElementKind::Float64,
            VectorData::Bool(_) => ElementKind::Bool,
        }
    }

    /// True for the multi-vector shape
    pub fn is_multi(&self) -> bool {
        for_each_shape!(self, s => s.is_multi())
    }

    /// Element count (single) or row count (multi)
    pub fn len(&self) -> usize {
        for_each_shape!(self, s => s.len())
    }

    /// True if there are no elements / rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A vector payload with an optional name
///
/// Unnamed vectors are the collection's default vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorValue {
    /// Target vector name
    pub name: Option<String>,
    /// Payload
    pub data: VectorData,
}

impl VectorValue {
    /// Unnamed vector
    pub fn new(data: VectorData) -> Self {
        VectorValue { name: None, data }
    }

    /// Named vector
    pub fn named(name: impl Into<String>, data: VectorData) -> Self {
        VectorValue {
            name: Some(name.into()),
            data,
        }
    }

    /// Encode the payload
    pub fn to_bytes(&self) -> strata_client_core::Result<Vec<u8>> {
        codec::encode(&self.data)
    }

    /// Decode a payload received for `name`
    pub fn from_bytes(
        name: Option<String>,
        bytes: &[u8],
        kind: ElementKind,
        multi: bool,
    ) -> strata_client_core::Result<Self> {
        let data = if multi {
            codec::decode_multi_as(bytes, kind)?
        } else {
            codec::decode_single_as(bytes, kind)?
        };
        Ok(VectorValue { name, data })
    }
}
