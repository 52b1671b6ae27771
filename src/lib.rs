//! # objstore
//!
//! A minimal persisted object store:
//! - A file-backed collection of uniquely identified records
//! - Each record holds key-ordered entries of typed values (text, i32, f32)
//! - Whole-file load and whole-file save, no partial writes
//! - Identifiers are never reused, across deletes and restarts
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              Collection  (load / save / CRUD)               │
//! │        next_id counter + Vec<Record> in creation order      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌──────────────────┐
//!   │   Record    │          │ SharedCollection │
//!   │ id + BTree  │          │     (RwLock)     │
//!   └──────┬──────┘          └──────────────────┘
//!          │
//!          ▼
//!   ┌─────────────┐
//!   │    Codec    │
//!   │ tagged value│
//!   └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use objstore::{Collection, Value};
//!
//! # fn main() -> objstore::Result<()> {
//! let mut collection = Collection::new("people.dat");
//! collection.load()?;
//!
//! let person = collection.create_object()?;
//! person.set_entry("name", "ada");
//! person.set_entry("age", 36);
//! let id = person.id();
//!
//! collection.save()?;
//! assert_eq!(
//!     collection.get_object(id).and_then(|r| r.get_entry("age")),
//!     Some(&Value::Integer(36))
//! );
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codec;
pub mod record;
pub mod collection;
pub mod adapter;
pub mod shared;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use adapter::Persistable;
pub use codec::{Value, ValueType};
pub use collection::Collection;
pub use config::Config;
pub use error::{Result, StoreError};
pub use record::Record;
pub use shared::SharedCollection;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of objstore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
