//! Error types for objstore
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for objstore operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // File Errors
    // -------------------------------------------------------------------------
    /// The backing file could not be opened (or stat'ed) for the requested mode
    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Format Errors
    // -------------------------------------------------------------------------
    /// Bad tag byte, truncated field, or otherwise undecodable bytes
    #[error("Format error: {0}")]
    Format(String),

    /// A length, count or identifier does not fit the 32-bit format
    #[error("Capacity exceeded: {0}")]
    Capacity(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
