//! Value encoder
//!
//! Writes fixed-width integers, length-prefixed text and tagged values.

use std::io::Write;

use crate::error::{Result, StoreError};

use super::Value;

/// Write a u32 in host byte order
pub fn write_u32<W: Write>(writer: &mut W, value: u32) -> Result<()> {
    writer.write_all(&value.to_ne_bytes())?;
    Ok(())
}

/// Convert an in-memory length to the 4-byte length field
pub fn checked_len(len: usize, what: &str) -> Result<u32> {
    u32::try_from(len).map_err(|_| {
        StoreError::Capacity(format!(
            "{} length {} exceeds u32::MAX",
            what, len
        ))
    })
}

/// Write `len:u32` followed by the raw bytes
///
/// Shared by entry keys and text values.
pub fn write_text<W: Write>(writer: &mut W, bytes: &[u8]) -> Result<()> {
    let len = checked_len(bytes.len(), "text")?;
    write_u32(writer, len)?;
    writer.write_all(bytes)?;
    Ok(())
}

/// Encode a value: tag byte followed by its payload, no padding
pub fn encode_value<W: Write>(writer: &mut W, value: &Value) -> Result<()> {
    writer.write_all(&[value.value_type().tag()])?;

    match value {
        Value::Text(bytes) => write_text(writer, bytes),
        Value::Integer(v) => {
            writer.write_all(&v.to_ne_bytes())?;
            Ok(())
        }
        Value::Float(v) => {
            writer.write_all(&v.to_ne_bytes())?;
            Ok(())
        }
    }
}

/// Encode a value into a fresh buffer
pub fn value_to_bytes(value: &Value) -> Result<Vec<u8>> {
    let capacity = match value {
        Value::Text(bytes) => 1 + 4 + bytes.len(),
        Value::Integer(_) | Value::Float(_) => 1 + 4,
    };
    let mut buf = Vec::with_capacity(capacity);
    encode_value(&mut buf, value)?;
    Ok(buf)
}
