//! Structure adapter
//!
//! Lets application types round-trip through collection records without
//! touching entries by hand.

use crate::collection::Collection;
use crate::error::Result;
use crate::record::{Record, TRANSIENT_ID};

/// A type that can be stored as a [`Record`]
pub trait Persistable {
    /// Identifier of the record this value was loaded from, 0 if never stored
    fn object_id(&self) -> u32;

    /// Copy this value's fields into the record's entries
    fn populate_record(&self, record: &mut Record);

    /// Replace this value's fields from the record's entries
    fn from_record(&mut self, record: &Record);
}

impl Collection {
    /// Store a structure as a new record and save the collection
    ///
    /// Returns the identifier of the new record.
    pub fn store_struct<S: Persistable + ?Sized>(&mut self, structure: &S) -> Result<u32> {
        let record = self.create_object()?;
        structure.populate_record(record);
        let id = record.id();
        self.save()?;
        Ok(id)
    }

    /// Write a structure back to its record and save the collection
    ///
    /// Falls back to creating a record when the structure has no identifier
    /// or its record no longer exists. Returns the identifier written to.
    pub fn save_struct<S: Persistable + ?Sized>(&mut self, structure: &S) -> Result<u32> {
        let existing = structure.object_id();
        let id = if existing != TRANSIENT_ID && self.get_object(existing).is_some() {
            existing
        } else {
            self.create_object()?.id()
        };

        if let Some(record) = self.get_object_mut(id) {
            structure.populate_record(record);
        }
        self.save()?;
        Ok(id)
    }

    /// Populate a structure from its record, returning that record
    ///
    /// Returns `None` and leaves the structure untouched if there is no such record.
    pub fn load_struct<S: Persistable + ?Sized>(&self, structure: &mut S) -> Option<&Record> {
        let record = self.get_object(structure.object_id())?;
        structure.from_record(record);
        Some(record)
    }
}
