//! Collection Module
//!
//! The file-backed container of records and the identifier counter.
//!
//! ## Responsibilities
//! - Whole-file load (replace all in-memory state)
//! - Whole-file save (overwrite the file from in-memory state)
//! - Create/lookup/delete over the in-memory record sequence
//! - Never reuse an identifier, across deletes and restarts
//!
//! ## File Format
//! ```text
//! ┌─────────────┬──────────────────┬──────────────────────────┐
//! │ NextId (4)  │ RecordCount (4)  │ Record ... (RecordCount) │
//! └─────────────┴──────────────────┴──────────────────────────┘
//! ```
//! No magic number and no version field. See [`crate::record`] and
//! [`crate::codec`] for the nested layouts.

use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::codec::{checked_len, write_u32, Decoder};
use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::record::{Record, TRANSIENT_ID};

/// First identifier handed out by a fresh collection
pub const FIRST_ID: u32 = 1;

/// Cap on up-front allocation from an untrusted record count
const PREALLOC_LIMIT: usize = 1024;

/// A file-backed, ordered sequence of records
///
/// ## Lifecycle
/// - `new`/`with_config` bind a path, no I/O happens
/// - `load` replaces the whole in-memory state from disk (or keeps the
///   defaults if the file does not exist)
/// - `create_object`/`delete_object`/entry edits change memory only
/// - `save` rewrites the whole file
///
/// Not synchronized. Use [`SharedCollection`](crate::SharedCollection) to
/// share one instance between threads. Two instances on the same path are
/// not coordinated and the last `save` wins.
#[derive(Debug)]
pub struct Collection {
    config: Config,

    /// Always greater than every identifier this instance has handed out
    next_id: u32,

    /// Records in creation/load order
    records: Vec<Record>,
}

impl Collection {
    /// Bind a collection to a file path with default config
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_config(Config::for_path(path))
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            next_id: FIRST_ID,
            records: Vec::new(),
        }
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Replace the in-memory state with the contents of the backing file
    ///
    /// A missing file is not an error: the current state is left as is.
    /// The file is fully parsed before anything is swapped in, so a corrupt
    /// file leaves the collection untouched.
    pub fn load(&mut self) -> Result<()> {
        let path = self.config.path.clone();

        match fs::metadata(&path) {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No collection file at {}, starting empty", path.display());
                return Ok(());
            }
            Err(source) => return Err(StoreError::Open { path, source }),
        }

        let file = File::open(&path).map_err(|source| StoreError::Open {
            path: path.clone(),
            source,
        })?;

        self.load_from(file)?;

        info!(
            "Loaded {} records from {} (next_id={})",
            self.records.len(),
            path.display(),
            self.next_id
        );
        Ok(())
    }

    /// Replace the in-memory state from any byte source in collection format
    pub fn load_from<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut decoder =
            Decoder::with_max_field_len(BufReader::new(reader), self.config.max_field_len);

        let next_id = decoder.read_u32("next id")?;
        if next_id == TRANSIENT_ID {
            warn!("Persisted next_id is 0, no further records can be created");
        }

        let count = decoder.read_u32("record count")?;
        let mut records = Vec::with_capacity((count as usize).min(PREALLOC_LIMIT));
        for _ in 0..count {
            records.push(Record::decode_from(&mut decoder)?);
        }

        let mut reader = decoder.into_inner();
        let trailing = reader.fill_buf()?.len();
        if trailing > 0 {
            warn!("Ignoring trailing bytes after {} records", count);
        }

        Self::check_identifiers(next_id, &records);

        self.next_id = next_id;
        self.records = records;
        Ok(())
    }

    /// Log identifier anomalies in freshly loaded state
    fn check_identifiers(next_id: u32, records: &[Record]) {
        let mut seen = HashSet::with_capacity(records.len());
        for record in records {
            if !seen.insert(record.id()) {
                warn!("Duplicate record id {} in collection file", record.id());
            }
        }

        if let Some(max_id) = records.iter().map(Record::id).max() {
            if next_id <= max_id {
                warn!(
                    "Persisted next_id {} is not above highest record id {}",
                    next_id, max_id
                );
            }
        }
    }

    /// Overwrite the backing file with the full in-memory state
    ///
    /// With `atomic_save` the bytes go to `{path}.tmp` first and are renamed
    /// over the target, so a crash never leaves a half-written file.
    pub fn save(&self) -> Result<()> {
        let target = &self.config.path;

        if self.config.atomic_save {
            let temp = self.temp_path();
            if let Err(e) = self.write_file(&temp) {
                let _ = fs::remove_file(&temp);
                return Err(e);
            }
            if let Err(e) = fs::rename(&temp, target) {
                let _ = fs::remove_file(&temp);
                return Err(StoreError::Io(e));
            }
            if self.config.sync_on_save {
                sync_parent_dir(target)?;
            }
        } else {
            self.write_file(target)?;
        }

        info!(
            "Saved {} records to {} (next_id={})",
            self.records.len(),
            target.display(),
            self.next_id
        );
        Ok(())
    }

    /// Write the full state in collection format to any sink
    pub fn save_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_u32(writer, self.next_id)?;
        write_u32(writer, checked_len(self.records.len(), "record count")?)?;
        for record in &self.records {
            record.encode(writer)?;
        }
        Ok(())
    }

    fn write_file(&self, path: &Path) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .map_err(|source| StoreError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        let mut writer = BufWriter::new(file);
        self.save_to(&mut writer)?;
        writer.flush()?;

        if self.config.sync_on_save {
            let file = writer.into_inner().map_err(|e| StoreError::Io(e.into_error()))?;
            file.sync_all()?;
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let path = &self.config.path;
        let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        path.with_file_name(name)
    }

    // =========================================================================
    // Records
    // =========================================================================

    /// Find a record by identifier (linear scan)
    pub fn get_object(&self, id: u32) -> Option<&Record> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn get_object_mut(&mut self, id: u32) -> Option<&mut Record> {
        self.records.iter_mut().find(|record| record.id() == id)
    }

    /// Append an empty record with the next identifier
    ///
    /// Memory only; call [`save`](Self::save) to persist. Fails with
    /// `Capacity` once the counter is at `u32::MAX` or was restored as 0.
    pub fn create_object(&mut self) -> Result<&mut Record> {
        let id = self.next_id;
        self.next_id = id
            .checked_add(1)
            .filter(|_| id != TRANSIENT_ID)
            .ok_or_else(|| StoreError::Capacity("record identifiers exhausted".to_string()))?;

        debug!("Created record {}", id);
        self.records.push(Record::with_id(id));
        let index = self.records.len() - 1;
        Ok(&mut self.records[index])
    }

    /// Remove the first record with this identifier, if any
    ///
    /// Memory only; the file changes on the next [`save`](Self::save).
    /// Deleting an unknown id is a no-op.
    pub fn delete_object(&mut self, id: u32) -> Option<Record> {
        let index = self.records.iter().position(|record| record.id() == id)?;
        debug!("Deleted record {}", id);
        Some(self.records.remove(index))
    }

    pub fn object_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in creation/load order
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The identifier the next `create_object` will assign
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(unix)]
fn sync_parent_dir(path: &Path) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    // fsync on a directory makes the rename durable
    File::open(parent)?.sync_all()?;
    Ok(())
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) -> Result<()> {
    Ok(())
}
