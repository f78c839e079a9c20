use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::document::Document;
use crate::error::{ConfigError, StoreError};
use crate::names::{
    is_staging_name, validate_document_name, validate_location, validate_store_name,
    STAGING_PREFIX, STAGING_SUFFIX,
};
use crate::outcome::{Outcome, StoreResult};
use crate::traits::{Documents, DocumentsStore};

/// Documents store keeping one file per document.
///
/// On-disk layout:
/// ```text
/// <location>/<name>/            store directory, created by `open`
/// <location>/<name>/<document>  document content, bytes verbatim
/// <location>/<name>/.~*.tmp     staging file of an in-flight save
/// ```
///
/// Saves write the content to a staging file in the store directory and
/// rename it over the target, so a crash leaves either the old or the new
/// content. Staging files are never reported as documents.
///
/// Enumeration reads the directory lazily. Entries that vanish or cannot be
/// read while iterating are logged and skipped.
pub struct OnDiskStore {
    name: String,
    location: PathBuf,
    opened: bool,
    sync_writes: bool,
}

impl OnDiskStore {
    /// Create a closed store rooted at `location/name`.
    ///
    /// Nothing is touched on disk until [`DocumentsStore::open`].
    pub fn new(name: impl Into<String>, location: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let name = name.into();
        let location = location.as_ref();
        validate_store_name(&name)?;
        validate_location(&location.to_string_lossy())?;

        Ok(Self {
            name,
            location: location.to_path_buf(),
            opened: false,
            sync_writes: false,
        })
    }

    /// `fsync` staged content before it replaces a document.
    pub fn sync_writes(mut self, enabled: bool) -> Self {
        self.sync_writes = enabled;
        self
    }

    /// The parent directory of the store directory.
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// The store directory, `location/name`.
    pub fn directory(&self) -> PathBuf {
        self.location.join(&self.name)
    }

    fn document_path(&self, name: &str) -> PathBuf {
        self.directory().join(name)
    }

    fn check_opened(&self) -> Result<(), StoreError> {
        if self.opened {
            Ok(())
        } else {
            Err(StoreError::not_opened(&self.name))
        }
    }

    /// Regular files of the store directory whose names are valid document
    /// names. Staging files are left out.
    fn entries(&self) -> Box<dyn Iterator<Item = (String, PathBuf)>> {
        let directory = self.directory();
        let read_dir = match fs::read_dir(&directory) {
            Ok(read_dir) => read_dir,
            Err(e) => {
                warn!(
                    path = %directory.display(),
                    error = %e,
                    "cannot list documents store directory"
                );
                return Box::new(std::iter::empty());
            }
        };

        Box::new(read_dir.filter_map(|entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable directory entry");
                    return None;
                }
            };
            let path = entry.path();
            if !path.is_file() {
                return None;
            }
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    warn!(file = ?raw, "skipping file with non UTF-8 name");
                    return None;
                }
            };
            if is_staging_name(&name) {
                return None;
            }
            if let Err(e) = validate_document_name(&name) {
                debug!(file = %name, error = %e, "skipping file with invalid document name");
                return None;
            }
            Some((name, path))
        }))
    }

    fn write_staged(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        let mut staged = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .suffix(STAGING_SUFFIX)
            .tempfile_in(self.directory())?;
        staged.write_all(content)?;
        if self.sync_writes {
            staged.as_file().sync_all()?;
        }
        staged.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl DocumentsStore for OnDiskStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn count(&self) -> usize {
        if self.opened {
            self.entries().count()
        } else {
            0
        }
    }

    fn is_opened(&self) -> bool {
        self.opened
    }

    fn documents(&self) -> Documents<'_> {
        if !self.opened {
            return Box::new(std::iter::empty());
        }

        Box::new(self.entries().filter_map(|(name, path)| match fs::read(&path) {
            Ok(content) => Document::new(name, content).ok(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable document");
                None
            }
        }))
    }

    fn open(&mut self) -> StoreResult {
        if self.opened {
            return Ok(Outcome::with_message(format!(
                "documents store '{}' is already opened",
                self.name
            )));
        }

        let directory = self.directory();
        if directory.is_dir() {
            self.opened = true;
            debug!(store = %self.name, path = %directory.display(), "on-disk store opened");
            return Ok(Outcome::with_message(format!(
                "documents store directory '{}' found and will be used",
                directory.display()
            )));
        }

        fs::create_dir_all(&directory).map_err(|e| {
            StoreError::io(
                format!("documents store '{}' cannot be opened", self.name),
                e,
            )
        })?;
        self.opened = true;

        debug!(store = %self.name, path = %directory.display(), "on-disk store created");
        Ok(Outcome::with_message(format!(
            "new directory '{}' created for documents store '{}'",
            directory.display(),
            self.name
        )))
    }

    fn close(&mut self) {
        self.opened = false;
    }

    fn has_document(&self, name: &str) -> bool {
        self.opened && validate_document_name(name).is_ok() && self.document_path(name).is_file()
    }

    fn load(&self, name: &str) -> StoreResult<Document> {
        validate_document_name(name)?;
        self.check_opened()?;

        let path = self.document_path(name);
        if !path.is_file() {
            return Err(StoreError::not_found(name));
        }
        let content = fs::read(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StoreError::not_found(name),
            _ => StoreError::io(format!("document '{name}' cannot be loaded"), e),
        })?;

        Ok(Outcome::new(
            Document::new(name, content)?,
            format!("document '{name}' loaded from '{}'", path.display()),
        ))
    }

    fn save(&mut self, document: Document) -> StoreResult {
        validate_document_name(document.name())?;
        self.check_opened()?;

        let name = document.name();
        let path = self.document_path(name);
        self.write_staged(&path, document.content())
            .map_err(|e| StoreError::io(format!("document '{name}' cannot be saved"), e))?;

        debug!(store = %self.name, document = name, bytes = document.len(), "document saved");
        Ok(Outcome::with_message(format!(
            "document '{name}' saved to '{}' in documents store '{}'",
            path.display(),
            self.name
        )))
    }

    fn rename(&mut self, name: &str, new_name: &str) -> StoreResult {
        validate_document_name(name)?;
        validate_document_name(new_name).map_err(|e| match e {
            StoreError::NameExpected => StoreError::NewNameExpected,
            other => other,
        })?;
        self.check_opened()?;

        let from = self.document_path(name);
        if !from.is_file() {
            return Err(StoreError::not_found(name));
        }
        let to = self.document_path(new_name);
        if to.exists() {
            return Err(StoreError::AlreadyExists {
                name: new_name.to_string(),
            });
        }

        fs::rename(&from, &to)
            .map_err(|e| StoreError::io(format!("document '{name}' cannot be renamed"), e))?;

        debug!(store = %self.name, from = name, to = new_name, "document renamed");
        Ok(Outcome::with_message(format!(
            "document '{name}' renamed to '{new_name}'"
        )))
    }

    fn delete(&mut self, name: &str) -> StoreResult {
        validate_document_name(name)?;
        self.check_opened()?;

        let path = self.document_path(name);
        if !path.is_file() {
            return Err(StoreError::not_found(name));
        }
        fs::remove_file(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StoreError::not_found(name),
            _ => StoreError::io(format!("document '{name}' cannot be deleted"), e),
        })?;

        debug!(store = %self.name, document = name, "document deleted");
        Ok(Outcome::with_message(format!("document '{name}' deleted")))
    }
}

impl std::fmt::Debug for OnDiskStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnDiskStore")
            .field("name", &self.name)
            .field("location", &self.location)
            .field("opened", &self.opened)
            .finish()
    }
}
