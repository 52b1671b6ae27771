//! Configuration for objstore
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{Result, StoreError};

/// Default limit for a single decoded text or key (64 MB)
pub const DEFAULT_MAX_FIELD_LEN: u32 = 64 * 1024 * 1024;

/// Configuration for a [`Collection`](crate::Collection)
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// The collection file. Saves also use `{path}.tmp` when `atomic_save` is on.
    pub path: PathBuf,

    // -------------------------------------------------------------------------
    // Save Configuration
    // -------------------------------------------------------------------------
    /// Write to a temporary file and rename it over the target
    pub atomic_save: bool,

    /// fsync the written file (and its directory after a rename)
    pub sync_on_save: bool,

    // -------------------------------------------------------------------------
    // Load Configuration
    // -------------------------------------------------------------------------
    /// Largest text or key length accepted while decoding (in bytes)
    pub max_field_len: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./objstore.dat"),
            atomic_save: true,
            sync_on_save: true,
            max_field_len: DEFAULT_MAX_FIELD_LEN,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Default config bound to the given file
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the collection file path
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path = path.into();
        self
    }

    /// Enable or disable write-then-rename saves
    pub fn atomic_save(mut self, enabled: bool) -> Self {
        self.config.atomic_save = enabled;
        self
    }

    /// Enable or disable fsync on save
    pub fn sync_on_save(mut self, enabled: bool) -> Self {
        self.config.sync_on_save = enabled;
        self
    }

    /// Set the maximum decoded field length (in bytes)
    pub fn max_field_len(mut self, len: u32) -> Self {
        self.config.max_field_len = len;
        self
    }

    pub fn build(self) -> Result<Config> {
        if self.config.path.as_os_str().is_empty() {
            return Err(StoreError::Config("path must not be empty".to_string()));
        }
        if self.config.max_field_len == 0 {
            return Err(StoreError::Config(
                "max_field_len must be greater than zero".to_string(),
            ));
        }
        Ok(self.config)
    }
}
