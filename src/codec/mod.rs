//! Codec Module
//!
//! Binary encoding of typed values.
//!
//! ## Value Format
//! ```text
//! ┌──────────┬─────────────────────────────────────────┐
//! │ Tag (1)  │              Payload                    │
//! └──────────┴─────────────────────────────────────────┘
//! ```
//!
//! ### Payload by Tag
//! - 0x00 TEXT:    len (4) + len raw bytes
//! - 0x01 INTEGER: i32 (4)
//! - 0x02 FLOAT:   f32 IEEE-754 (4)
//!
//! All integers are fixed-width in host byte order with no padding. Any
//! other tag byte is rejected as a format error.

mod decoder;
mod encoder;
mod value;

pub use decoder::{decode_value, value_from_bytes, Decoder};
pub use encoder::{checked_len, encode_value, value_to_bytes, write_text, write_u32};
pub use value::{Value, ValueType};
