//! Typed value definitions
//!
//! The scalar stored under each record key.

use std::fmt;

/// Discriminator persisted before every value payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ValueType {
    Text = 0x00,
    Integer = 0x01,
    Float = 0x02,
}

impl ValueType {
    /// The tag byte written to storage
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Parse a tag byte, `None` for anything outside {0, 1, 2}
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x00 => Some(ValueType::Text),
            0x01 => Some(ValueType::Integer),
            0x02 => Some(ValueType::Float),
            _ => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Text => "text",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
        };
        f.write_str(name)
    }
}

/// A typed scalar: raw text bytes, a 32-bit signed integer or a 32-bit float
///
/// Text is length-prefixed raw bytes on disk and is not required to be UTF-8.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(Vec<u8>),
    Integer(i32),
    Float(f32),
}

impl Value {
    /// Build a text value from anything byte-like
    pub fn text(bytes: impl Into<Vec<u8>>) -> Self {
        Value::Text(bytes.into())
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Text(_) => ValueType::Text,
            Value::Integer(_) => ValueType::Integer,
            Value::Float(_) => ValueType::Float,
        }
    }

    pub fn as_text(&self) -> Option<&[u8]> {
        match self {
            Value::Text(bytes) => Some(bytes.as_slice()),
            _ => None,
        }
    }

    /// Text payload as `&str`, `None` if not text or not valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        self.as_text().and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(bytes) => write!(f, "{:?}", String::from_utf8_lossy(bytes)),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.as_bytes().to_vec())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value.into_bytes())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Text(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Text(value.to_vec())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value)
    }
}
