//! Pluggable documents store.
//!
//! A document is a named blob of bytes. Stores hold documents behind one
//! contract, [`DocumentsStore`]: an opened/closed lifecycle plus
//! has/load/save/rename/delete and enumeration.
//!
//! # Backends
//!
//! - [`InMemoryStore`] -- insertion-ordered map, for tests and embedding
//! - [`OnDiskStore`] -- one file per document in `location/name/`
//! - [`ArchivingStore`] -- composite whose `delete` moves documents from a
//!   master store into an archive store
//!
//! # Errors
//!
//! Operations return [`StoreResult`]: an [`Outcome`] (payload plus message)
//! or a [`StoreError`]. Constructors return [`ConfigError`]; a bad store name
//! or location is a setup defect, not a data condition.
//!
//! # Example
//!
//! ```
//! use docstore_core::{Document, DocumentsStore, InMemoryStore};
//!
//! let mut store = InMemoryStore::new("notes").unwrap();
//! store.open().unwrap();
//! store.save(Document::new("todo", b"milk".to_vec()).unwrap()).unwrap();
//! assert!(store.has_document("todo"));
//! ```

pub mod archive;
pub mod config;
pub mod disk;
pub mod document;
pub mod error;
pub mod ext;
pub mod memory;
pub mod names;
pub mod outcome;
pub mod traits;

#[cfg(test)]
mod testing;

// Re-export primary types at crate root for ergonomic imports.
pub use archive::{archive_document, ArchivingStore};
pub use config::{Backend, StoreConfig};
pub use disk::OnDiskStore;
pub use document::Document;
pub use error::{ConfigError, StoreError};
pub use ext::{create_temp_file, delete_temp_file, DocumentsStoreExt};
pub use memory::InMemoryStore;
pub use outcome::{Outcome, OutcomeExt, SimpleResult, StoreResult};
pub use traits::{Documents, DocumentsStore};
