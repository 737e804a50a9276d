//! Vector codec
//!
//! Generic functions work on any [`VectorElement`]; the `_as` variants and
//! [`encode`] dispatch on a runtime [`ElementKind`].

use super::{ElementKind, Shape, VectorData, VectorElement};
use byteorder::{ByteOrder, LittleEndian};
use strata_client_core::{MarshalError, Result};

/// Length of the multi-vector row-width header
pub const MULTI_HEADER_LEN: usize = 2;

/// Encode a single vector: elements back to back, no header
pub fn encode_single<T: VectorElement>(values: &[T]) -> Vec<u8> {
    let mut buf = vec![0u8; values.len() * T::SIZE];
    write_elements(&mut buf, values);
    buf
}

/// Encode a multi-vector: `u16le` row width, then all rows
///
/// An empty matrix encodes as a zero width header. Rows of width 0 are
/// rejected: the frame has no row count, so they would decode to nothing.
pub fn encode_multi<T: VectorElement>(rows: &[Vec<T>]) -> Result<Vec<u8>> {
    let width = rows.first().map_or(0, Vec::len);
    if width == 0 && !rows.is_empty() {
        return Err(MarshalError::EmptyRows { rows: rows.len() });
    }
    if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
        return Err(MarshalError::RaggedMatrix {
            row,
            expected: width,
            actual: r.len(),
        });
    }
    let header = u16::try_from(width).map_err(|_| MarshalError::RowTooWide { width })?;

    let mut buf = vec![0u8; MULTI_HEADER_LEN + rows.len() * width * T::SIZE];
    LittleEndian::write_u16(&mut buf[..MULTI_HEADER_LEN], header);
    let mut offset = MULTI_HEADER_LEN;
    for row in rows {
        let end = offset + row.len() * T::SIZE;
        write_elements(&mut buf[offset..end], row);
        offset = end;
    }
    Ok(buf)
}

/// Decode a single vector, reading elements until the buffer is exhausted
pub fn decode_single<T: VectorElement>(bytes: &[u8]) -> Result<Vec<T>> {
    if bytes.len() % T::SIZE != 0 {
        return Err(MarshalError::TruncatedVector {
            len: bytes.len(),
            element_size: T::SIZE,
        });
    }
    Ok(bytes.chunks_exact(T::SIZE).map(T::get).collect())
}

/// Decode a multi-vector
///
/// Row count is `remaining / (width * size)`; a remainder that is not a whole
/// number of rows is rejected.
pub fn decode_multi<T: VectorElement>(bytes: &[u8]) -> Result<Vec<Vec<T>>> {
    if bytes.len() < MULTI_HEADER_LEN {
        return Err(MarshalError::TruncatedVector {
            len: bytes.len(),
            element_size: MULTI_HEADER_LEN,
        });
    }
    let width = usize::from(LittleEndian::read_u16(&bytes[..MULTI_HEADER_LEN]));
    let body = &bytes[MULTI_HEADER_LEN..];

    if width == 0 {
        if body.is_empty() {
            return Ok(Vec::new());
        }
        return Err(MarshalError::RaggedMatrix {
            row: 0,
            expected: 0,
            actual: body.len() / T::SIZE,
        });
    }

    let row_bytes = width * T::SIZE;
    if body.len() % row_bytes != 0 {
        return Err(MarshalError::TruncatedVector {
            len: body.len(),
            element_size: row_bytes,
        });
    }
    Ok(body
        .chunks_exact(row_bytes)
        .map(|row| row.chunks_exact(T::SIZE).map(T::get).collect())
        .collect())
}

/// Encode runtime-tagged data
pub fn encode(data: &VectorData) -> Result<Vec<u8>> {
    match data {
        VectorData::Int16(shape) => encode_shape(shape),
        VectorData::Int32(shape) => encode_shape(shape),
        VectorData::Int64(shape) => encode_shape(shape),
        VectorData::Byte(shape) => encode_shape(shape),
        VectorData::Float32(shape) => encode_shape(shape),
        VectorData::Float64(shape) => encode_shape(shape),
        VectorData::Bool(shape) => encode_shape(shape),
        VectorData::Int8(_)
        | VectorData::UInt16(_)
        | VectorData::UInt32(_)
        | VectorData::UInt64(_) => Err(MarshalError::unsupported_kind(data.kind().name())),
    }
}

/// Decode a single vector of a runtime kind
pub fn decode_single_as(bytes: &[u8], kind: ElementKind) -> Result<VectorData> {
    Ok(match kind {
        ElementKind::Int16 => VectorData::Int16(Shape::Single(decode_single(bytes)?)),
        ElementKind::Int32 => VectorData::Int32(Shape::Single(decode_single(bytes)?)),
        ElementKind::Int64 => VectorData::Int64(Shape::Single(decode_single(bytes)?)),
        ElementKind::Byte => VectorData::Byte(Shape::Single(decode_single(bytes)?)),
        ElementKind::Float32 => VectorData::Float32(Shape::Single(decode_single(bytes)?)),
        ElementKind::Float64 => VectorData::Float64(Shape::Single(decode_single(bytes)?)),
        ElementKind::Bool => VectorData::Bool(Shape::Single(decode_single(bytes)?)),
        ElementKind::Int8 | ElementKind::UInt16 | ElementKind::UInt32 | ElementKind::UInt64 => {
            return Err(MarshalError::unsupported_kind(kind.name()))
        }
    })
}

/// Decode a multi-vector of a runtime kind
pub fn decode_multi_as(bytes: &[u8], kind: ElementKind) -> Result<VectorData> {
    Ok(match kind {
        ElementKind::Int16 => VectorData::Int16(Shape::Multi(decode_multi(bytes)?)),
        ElementKind::Int32 => VectorData::Int32(Shape::Multi(decode_multi(bytes)?)),
        ElementKind::Int64 => VectorData::Int64(Shape::Multi(decode_multi(bytes)?)),
        ElementKind::Byte => VectorData::Byte(Shape::Multi(decode_multi(bytes)?)),
        ElementKind::Float32 => VectorData::Float32(Shape::Multi(decode_multi(bytes)?)),
        ElementKind::Float64 => VectorData::Float64(Shape::Multi(decode_multi(bytes)?)),
        ElementKind::Bool => VectorData::Bool(Shape::Multi(decode_multi(bytes)?)),
        ElementKind::Int8 | ElementKind::UInt16 | ElementKind::UInt32 | ElementKind::UInt64 => {
            return Err(MarshalError::unsupported_kind(kind.name()))
        }
    })
}

fn encode_shape<T: VectorElement>(shape: &Shape<T>) -> Result<Vec<u8>> {
    match shape {
        Shape::Single(values) => Ok(encode_single(values)),
        Shape::Multi(rows) => encode_multi(rows),
    }
}

fn write_elements<T: VectorElement>(out: &mut [u8], values: &[T]) {
    for (chunk, value) in out.chunks_exact_mut(T::SIZE).zip(values) {
        value.put(chunk);
    }
}
