//! Value decoder
//!
//! Reads the primitives of the collection format from any `Read` source.
//! A source that ends before a field is complete is a format error, not an
//! I/O error.

use std::io::{ErrorKind, Read};

use crate::config::DEFAULT_MAX_FIELD_LEN;
use crate::error::{Result, StoreError};

use super::{Value, ValueType};

/// Streaming decoder over a byte source
pub struct Decoder<R> {
    reader: R,
    /// Upper bound for any length-prefixed field
    max_field_len: u32,
}

impl<R: Read> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Self::with_max_field_len(reader, DEFAULT_MAX_FIELD_LEN)
    }

    pub fn with_max_field_len(reader: R, max_field_len: u32) -> Self {
        Self {
            reader,
            max_field_len,
        }
    }

    /// Give back the underlying reader
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn read_exact(&mut self, buf: &mut [u8], what: &str) -> Result<()> {
        self.reader.read_exact(buf).map_err(|e| {
            if e.kind() == ErrorKind::UnexpectedEof {
                StoreError::Format(format!("unexpected end of stream while reading {}", what))
            } else {
                StoreError::Io(e)
            }
        })
    }

    pub fn read_u8(&mut self, what: &str) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.read_exact(&mut buf, what)?;
        Ok(buf[0])
    }

    pub fn read_u32(&mut self, what: &str) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf, what)?;
        Ok(u32::from_ne_bytes(buf))
    }

    pub fn read_i32(&mut self, what: &str) -> Result<i32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf, what)?;
        Ok(i32::from_ne_bytes(buf))
    }

    pub fn read_f32(&mut self, what: &str) -> Result<f32> {
        let mut buf = [0u8; 4];
        self.read_exact(&mut buf, what)?;
        Ok(f32::from_ne_bytes(buf))
    }

    /// Read `len:u32` then exactly `len` bytes into a new buffer
    pub fn read_text(&mut self, what: &str) -> Result<Vec<u8>> {
        let len = self.read_u32(what)?;
        if len > self.max_field_len {
            return Err(StoreError::Format(format!(
                "{} length {} exceeds limit of {} bytes",
                what, len, self.max_field_len
            )));
        }

        let mut bytes = vec![0u8; len as usize];
        self.read_exact(&mut bytes, what)?;
        Ok(bytes)
    }

    /// Read a tag byte and the payload it selects
    pub fn read_value(&mut self) -> Result<Value> {
        let tag = self.read_u8("value tag")?;
        let value_type = ValueType::from_tag(tag).ok_or_else(|| {
            StoreError::Format(format!("unknown value tag: 0x{:02x}", tag))
        })?;

        match value_type {
            ValueType::Text => Ok(Value::Text(self.read_text("text value")?)),
            ValueType::Integer => Ok(Value::Integer(self.read_i32("integer value")?)),
            ValueType::Float => Ok(Value::Float(self.read_f32("float value")?)),
        }
    }
}

/// Decode a single value from a stream
pub fn decode_value<R: Read>(reader: &mut R) -> Result<Value> {
    Decoder::new(reader).read_value()
}

/// Decode a single value from a byte slice
pub fn value_from_bytes(mut bytes: &[u8]) -> Result<Value> {
    decode_value(&mut bytes)
}
