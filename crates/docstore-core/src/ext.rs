//! Convenience helpers over the [`DocumentsStore`] contract.
//!
//! Everything here is built from `load`, `save` and `delete`; no helper
//! touches a store's storage directly.

use std::fs;
use std::path::{Path, PathBuf};

use crate::archive::archive_document;
use crate::document::Document;
use crate::error::StoreError;
use crate::outcome::{Outcome, StoreResult};
use crate::traits::DocumentsStore;

fn check_path(path: &Path) -> Result<(), StoreError> {
    if path.as_os_str().is_empty() || path.to_string_lossy().trim().is_empty() {
        Err(StoreError::PathExpected)
    } else {
        Ok(())
    }
}

/// Helper methods available on every [`DocumentsStore`].
pub trait DocumentsStoreExt: DocumentsStore {
    /// Content of a document, or `None` if it cannot be loaded.
    fn load_bytes(&self, name: &str) -> Option<Vec<u8>> {
        self.load(name)
            .ok()
            .map(|outcome| outcome.into_data().into_content())
    }

    /// Content of a document decoded as UTF-8. Invalid sequences are
    /// replaced with U+FFFD.
    fn load_string(&self, name: &str) -> Option<String> {
        self.load_bytes(name)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Save raw bytes under `name`.
    fn save_bytes(&mut self, name: &str, content: &[u8]) -> StoreResult {
        self.save(Document::new(name, content)?)
    }

    /// Save a string as UTF-8 bytes under `name`.
    fn save_string(&mut self, name: &str, content: &str) -> StoreResult {
        self.save_bytes(name, content.as_bytes())
    }

    /// Move a document into `archive`. See [`archive_document`].
    fn archive_to<A>(&mut self, name: &str, archive: &mut A) -> StoreResult
    where
        A: DocumentsStore + ?Sized,
    {
        archive_document(self, name, archive)
    }

    /// Save the content of an external file as document `name`.
    fn import_document(&mut self, path: &Path, name: &str) -> StoreResult {
        check_path(path)?;
        if name.trim().is_empty() {
            return Err(StoreError::NameExpected);
        }
        if !path.is_file() {
            return Err(StoreError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read(path).map_err(|e| {
            StoreError::io(format!("import of '{}' failed", path.display()), e)
        })?;
        self.save_bytes(name, &content)
    }

    /// Write the content of document `name` to an external file.
    fn export_document(&self, name: &str, path: &Path) -> StoreResult {
        if name.trim().is_empty() {
            return Err(StoreError::NameExpected);
        }
        check_path(path)?;

        let document = self.load(name)?.into_data();
        fs::write(path, document.content())
            .map_err(|e| StoreError::io(format!("export of '{name}' failed"), e))?;

        Ok(Outcome::with_message(format!(
            "document '{name}' exported to '{}'",
            path.display()
        )))
    }
}

impl<S: DocumentsStore + ?Sized> DocumentsStoreExt for S {}

/// Create a zero-byte temporary file that outlives this call.
///
/// The caller removes it with [`delete_temp_file`].
pub fn create_temp_file() -> StoreResult<PathBuf> {
    let file = tempfile::NamedTempFile::new()
        .map_err(|e| StoreError::io("temporary file cannot be created", e))?;
    let path = file
        .into_temp_path()
        .keep()
        .map_err(|e| StoreError::io("temporary file cannot be kept", e.error))?;

    let message = format!("temporary file '{}' created", path.display());
    Ok(Outcome::new(path, message))
}

/// Delete a temporary file. A file that is already gone counts as success.
pub fn delete_temp_file(path: &Path) -> StoreResult {
    check_path(path)?;
    if !path.exists() {
        return Ok(Outcome::with_message(format!(
            "file '{}' not found",
            path.display()
        )));
    }

    fs::remove_file(path).map_err(|e| {
        StoreError::io(format!("file '{}' cannot be deleted", path.display()), e)
    })?;
    Ok(Outcome::with_message(format!(
        "file '{}' deleted",
        path.display()
    )))
}
