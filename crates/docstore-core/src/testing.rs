//! Store doubles for failure-path tests.

use crate::document::Document;
use crate::error::StoreError;
use crate::outcome::StoreResult;
use crate::traits::{Documents, DocumentsStore};

/// A store whose every operation fails.
pub(crate) struct FailingStore {
    name: String,
    opened: bool,
}

impl FailingStore {
    /// Closed; `open` fails.
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            opened: false,
        }
    }

    /// Reports itself opened, but still fails every operation.
    pub(crate) fn opened(name: &str) -> Self {
        Self {
            name: name.to_string(),
            opened: true,
        }
    }
}

impl DocumentsStore for FailingStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn count(&self) -> usize {
        0
    }

    fn is_opened(&self) -> bool {
        self.opened
    }

    fn documents(&self) -> Documents<'_> {
        Box::new(std::iter::empty())
    }

    fn open(&mut self) -> StoreResult {
        Err(StoreError::Other(format!(
            "documents store '{}' cannot be opened",
            self.name
        )))
    }

    fn close(&mut self) {}

    fn has_document(&self, _name: &str) -> bool {
        false
    }

    fn load(&self, name: &str) -> StoreResult<Document> {
        if name.is_empty() {
            return Err(StoreError::NameExpected);
        }
        Err(StoreError::not_found(name))
    }

    fn save(&mut self, document: Document) -> StoreResult {
        Err(StoreError::Other(format!(
            "document '{}' cannot be saved into documents store '{}'",
            document.name(),
            self.name
        )))
    }

    fn rename(&mut self, name: &str, new_name: &str) -> StoreResult {
        if name.is_empty() {
            return Err(StoreError::NameExpected);
        }
        if new_name.is_empty() {
            return Err(StoreError::NewNameExpected);
        }
        Err(StoreError::Other(format!(
            "document '{name}' cannot be renamed in documents store '{}'",
            self.name
        )))
    }

    fn delete(&mut self, name: &str) -> StoreResult {
        if name.is_empty() {
            return Err(StoreError::NameExpected);
        }
        Err(StoreError::Other(format!(
            "document '{name}' cannot be deleted from documents store '{}'",
            self.name
        )))
    }
}

/// Wraps a working store and refuses to delete anything.
pub(crate) struct NoDeleteStore<S> {
    inner: S,
}

impl<S: DocumentsStore> NoDeleteStore<S> {
    pub(crate) fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: DocumentsStore> DocumentsStore for NoDeleteStore<S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn count(&self) -> usize {
        self.inner.count()
    }

    fn is_opened(&self) -> bool {
        self.inner.is_opened()
    }

    fn documents(&self) -> Documents<'_> {
        self.inner.documents()
    }

    fn open(&mut self) -> StoreResult {
        self.inner.open()
    }

    fn close(&mut self) {
        self.inner.close()
    }

    fn has_document(&self, name: &str) -> bool {
        self.inner.has_document(name)
    }

    fn load(&self, name: &str) -> StoreResult<Document> {
        self.inner.load(name)
    }

    fn save(&mut self, document: Document) -> StoreResult {
        self.inner.save(document)
    }

    fn rename(&mut self, name: &str, new_name: &str) -> StoreResult {
        self.inner.rename(name, new_name)
    }

    fn delete(&mut self, name: &str) -> StoreResult {
        Err(StoreError::Other(format!(
            "document '{name}' cannot be deleted from documents store '{}'",
            self.inner.name()
        )))
    }
}
