//! Shared collection handle
//!
//! A cloneable handle that serializes access to one [`Collection`] across
//! threads. Reads (lookups, counts) take the read lock; loads, saves and
//! mutations take the write lock, so a save always sees a consistent state.
//!
//! This only coordinates handles cloned from the same instance. It does not
//! lock the file against other processes.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::collection::Collection;
use crate::error::Result;
use crate::record::Record;

/// Thread-safe handle to a collection
#[derive(Debug, Clone)]
pub struct SharedCollection {
    inner: Arc<RwLock<Collection>>,
}

impl SharedCollection {
    pub fn new(collection: Collection) -> Self {
        Self {
            inner: Arc::new(RwLock::new(collection)),
        }
    }

    pub fn load(&self) -> Result<()> {
        self.inner.write().load()
    }

    /// Saves under the write lock so no mutation interleaves with the write
    pub fn save(&self) -> Result<()> {
        let collection = self.inner.write();
        collection.save()
    }

    /// Run a closure with shared access
    pub fn read<T>(&self, f: impl FnOnce(&Collection) -> T) -> T {
        f(&*self.inner.read())
    }

    /// Run a closure with exclusive access
    pub fn write<T>(&self, f: impl FnOnce(&mut Collection) -> T) -> T {
        f(&mut *self.inner.write())
    }

    /// Create a record, fill it in, and return its identifier
    pub fn create_with(&self, populate: impl FnOnce(&mut Record)) -> Result<u32> {
        let mut collection = self.inner.write();
        let record = collection.create_object()?;
        populate(record);
        Ok(record.id())
    }

    /// Clone of the record with this identifier
    pub fn get_object(&self, id: u32) -> Option<Record> {
        self.inner.read().get_object(id).cloned()
    }

    pub fn delete_object(&self, id: u32) -> Option<Record> {
        self.inner.write().delete_object(id)
    }

    pub fn object_count(&self) -> usize {
        self.inner.read().object_count()
    }

    pub fn next_id(&self) -> u32 {
        self.inner.read().next_id()
    }
}

impl From<Collection> for SharedCollection {
    fn from(collection: Collection) -> Self {
        Self::new(collection)
    }
}
