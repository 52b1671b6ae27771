//! Record definitions
//!
//! One persisted entity: an identifier plus key-ordered typed entries.
//!
//! ## Record Format
//! ```text
//! ┌─────────┬──────────────┬──────────────────────────────────────┐
//! │ Id (4)  │ EntryCount(4)│ [KeyLen (4)][Key][Value] ...         │
//! └─────────┴──────────────┴──────────────────────────────────────┘
//! ```
//! Entries are written in ascending key order.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use crate::codec::{checked_len, encode_value, write_text, write_u32, Decoder, Value};
use crate::error::Result;

/// Identifier reserved for records that were never assigned one by a collection
pub const TRANSIENT_ID: u32 = 0;

/// An identified set of key/value entries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    id: u32,
    /// Raw key bytes; BTreeMap keeps the on-disk ascending byte order
    entries: BTreeMap<Vec<u8>, Value>,
}

impl Record {
    /// Create an empty transient record (id 0)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: u32) -> Self {
        Self {
            id,
            entries: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// True if this record has never been assigned an identifier
    pub fn is_transient(&self) -> bool {
        self.id == TRANSIENT_ID
    }

    /// Insert or overwrite an entry, returning the previous value
    ///
    /// Keys are raw bytes, so `&str`, `String`, `Vec<u8>` and `&[u8]` all work.
    /// A key may change type between calls.
    pub fn set_entry(&mut self, key: impl Into<Vec<u8>>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get_entry(&self, key: &str) -> Option<&Value> {
        self.get_entry_bytes(key.as_bytes())
    }

    /// Lookup by raw key bytes, for keys that are not UTF-8
    pub fn get_entry_bytes(&self, key: &[u8]) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_entry_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key.as_bytes())
    }

    pub fn remove_entry(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key.as_bytes())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key.as_bytes())
    }

    /// Drop every entry, keeping the identifier
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries in ascending byte order of their keys
    pub fn entries(&self) -> impl Iterator<Item = (&[u8], &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_slice(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    /// Write id, entry count and each entry in ascending key order
    pub fn encode<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_u32(writer, self.id)?;
        write_u32(writer, checked_len(self.entries.len(), "entry count")?)?;

        for (key, value) in &self.entries {
            write_text(writer, key)?;
            encode_value(writer, value)?;
        }

        Ok(())
    }

    /// Read a record from a stream using the default field limit
    pub fn decode<R: Read>(reader: &mut R) -> Result<Self> {
        Self::decode_from(&mut Decoder::new(reader))
    }

    /// Read a record through an existing decoder
    ///
    /// A key that appears twice keeps the last value.
    pub fn decode_from<R: Read>(decoder: &mut Decoder<R>) -> Result<Self> {
        let id = decoder.read_u32("record id")?;
        let count = decoder.read_u32("entry count")?;

        let mut entries = BTreeMap::new();
        for _ in 0..count {
            let key = decoder.read_text("entry key")?;
            let value = decoder.read_value()?;
            entries.insert(key, value);
        }

        Ok(Self { id, entries })
    }

    /// Encode into a fresh buffer
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.encode(&mut buf)?;
        Ok(buf)
    }

    pub fn from_bytes(mut bytes: &[u8]) -> Result<Self> {
        Self::decode(&mut bytes)
    }
}
