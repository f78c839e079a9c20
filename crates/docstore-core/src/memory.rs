use indexmap::IndexMap;
use tracing::debug;

use crate::document::Document;
use crate::error::{ConfigError, StoreError};
use crate::outcome::{Outcome, StoreResult};
use crate::traits::{Documents, DocumentsStore};

/// In-memory, map-based documents store.
///
/// Intended for tests and embedding. The map is created once and kept for the
/// lifetime of the store; closing only hides its contents. Documents are
/// enumerated in insertion order, and a replacing save or a rename moves the
/// document to the end.
pub struct InMemoryStore {
    name: String,
    opened: bool,
    documents: IndexMap<String, Document>,
}

impl InMemoryStore {
    /// Create a new, closed and empty store.
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConfigError::StoreNameExpected);
        }
        Ok(Self {
            name,
            opened: false,
            documents: IndexMap::new(),
        })
    }

    fn check_name(name: &str, missing: StoreError) -> Result<(), StoreError> {
        if name.is_empty() {
            Err(missing)
        } else {
            Ok(())
        }
    }

    fn check_opened(&self) -> Result<(), StoreError> {
        if self.opened {
            Ok(())
        } else {
            Err(StoreError::not_opened(&self.name))
        }
    }
}

impl DocumentsStore for InMemoryStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn count(&self) -> usize {
        if self.opened {
            self.documents.len()
        } else {
            0
        }
    }

    fn is_opened(&self) -> bool {
        self.opened
    }

    fn documents(&self) -> Documents<'_> {
        if self.opened {
            Box::new(self.documents.values().cloned())
        } else {
            Box::new(std::iter::empty())
        }
    }

    fn open(&mut self) -> StoreResult {
        if self.opened {
            return Ok(Outcome::with_message(format!(
                "documents store '{}' is already opened",
                self.name
            )));
        }
        self.opened = true;
        debug!(store = %self.name, "in-memory store opened");
        Ok(Outcome::with_message(format!(
            "documents store '{}' opened",
            self.name
        )))
    }

    fn close(&mut self) {
        self.opened = false;
    }

    fn has_document(&self, name: &str) -> bool {
        self.opened && !name.is_empty() && self.documents.contains_key(name)
    }

    fn load(&self, name: &str) -> StoreResult<Document> {
        Self::check_name(name, StoreError::NameExpected)?;
        self.check_opened()?;

        let document = self
            .documents
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::not_found(name))?;
        Ok(Outcome::new(
            document,
            format!("document '{name}' loaded from documents store '{}'", self.name),
        ))
    }

    fn save(&mut self, document: Document) -> StoreResult {
        self.check_opened()?;

        let name = document.name().to_string();
        // Full replacement: drop the old entry so the new one lands at the end.
        self.documents.shift_remove(&name);
        self.documents.insert(name.clone(), document);

        debug!(store = %self.name, document = %name, "document saved");
        Ok(Outcome::with_message(format!(
            "document '{name}' saved to documents store '{}'",
            self.name
        )))
    }

    fn rename(&mut self, name: &str, new_name: &str) -> StoreResult {
        Self::check_name(name, StoreError::NameExpected)?;
        Self::check_name(new_name, StoreError::NewNameExpected)?;
        self.check_opened()?;

        let renamed = match self.documents.get(name) {
            Some(document) => document.renamed(new_name),
            None => return Err(StoreError::not_found(name)),
        };
        if self.documents.contains_key(new_name) {
            return Err(StoreError::AlreadyExists {
                name: new_name.to_string(),
            });
        }

        // Insert first, then remove; undo the insert if the removal fails.
        self.documents.insert(new_name.to_string(), renamed);
        if self.documents.shift_remove(name).is_none() {
            self.documents.shift_remove(new_name);
            return Err(StoreError::RemoveFailed {
                store: self.name.clone(),
                name: name.to_string(),
            });
        }

        debug!(store = %self.name, from = name, to = new_name, "document renamed");
        Ok(Outcome::with_message(format!(
            "document '{name}' renamed to '{new_name}'"
        )))
    }

    fn delete(&mut self, name: &str) -> StoreResult {
        Self::check_name(name, StoreError::NameExpected)?;
        self.check_opened()?;

        if self.documents.shift_remove(name).is_none() {
            return Err(StoreError::not_found(name));
        }

        debug!(store = %self.name, document = name, "document deleted");
        Ok(Outcome::with_message(format!("document '{name}' deleted")))
    }
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("name", &self.name)
            .field("opened", &self.opened)
            .field("document_count", &self.documents.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::OutcomeExt;

    fn doc(name: &str, content: &[u8]) -> Document {
        Document::new(name, content).unwrap()
    }

    fn opened_store() -> InMemoryStore {
        let mut store = InMemoryStore::new("test").unwrap();
        store.open().unwrap();
        store
    }

    // -----------------------------------------------------------------------
    // Construction and lifecycle
    // -----------------------------------------------------------------------

    #[test]
    fn empty_name_not_allowed() {
        assert!(matches!(
            InMemoryStore::new(""),
            Err(ConfigError::StoreNameExpected)
        ));
    }

    #[test]
    fn new_store_is_closed_and_empty() {
        let store = InMemoryStore::new("x").unwrap();
        assert_eq!(store.name(), "x");
        assert!(!store.is_opened());
        assert_eq!(store.count(), 0);
        assert_eq!(store.documents().count(), 0);
    }

    #[test]
    fn open_is_idempotent() {
        let mut store = InMemoryStore::new("x").unwrap();
        assert!(store.open().is_ok());
        assert!(store.is_opened());
        assert!(store.open().is_ok());
        assert!(store.is_opened());
    }

    #[test]
    fn close_is_idempotent() {
        let mut store = opened_store();
        store.close();
        store.close();
        assert!(!store.is_opened());
    }

    #[test]
    fn save_then_count() {
        let mut store = InMemoryStore::new("x").unwrap();
        assert_eq!(store.count(), 0);
        assert!(store.open().is_ok());

        let result = store.save(doc("d", &[1, 2, 3]));
        assert!(result.is_success());
        assert!(OutcomeExt::message(&result).contains("d"));
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn close_hides_documents_and_reopen_restores_them() {
        let mut store = opened_store();
        store.save(doc("d", b"abc")).unwrap();

        store.close();
        assert!(!store.has_document("d"));
        assert_eq!(store.count(), 0);
        assert_eq!(store.documents().count(), 0);

        store.open().unwrap();
        assert!(store.has_document("d"));
        assert_eq!(store.load("d").unwrap().data().content(), b"abc");
    }

    // -----------------------------------------------------------------------
    // Closed-store behaviour
    // -----------------------------------------------------------------------

    #[test]
    fn operations_fail_when_closed() {
        let mut store = InMemoryStore::new("closed").unwrap();
        assert!(matches!(store.load("d"), Err(StoreError::NotOpened { .. })));
        assert!(matches!(
            store.save(doc("d", b"")),
            Err(StoreError::NotOpened { .. })
        ));
        assert!(matches!(
            store.rename("a", "b"),
            Err(StoreError::NotOpened { .. })
        ));
        assert!(matches!(store.delete("d"), Err(StoreError::NotOpened { .. })));
    }

    #[test]
    fn name_errors_come_before_opened_check() {
        let mut store = InMemoryStore::new("closed").unwrap();
        assert!(matches!(store.load(""), Err(StoreError::NameExpected)));
        assert!(matches!(store.rename("", "b"), Err(StoreError::NameExpected)));
        assert!(matches!(
            store.rename("a", ""),
            Err(StoreError::NewNameExpected)
        ));
        assert!(matches!(store.delete(""), Err(StoreError::NameExpected)));
    }

    // -----------------------------------------------------------------------
    // CRUD
    // -----------------------------------------------------------------------

    #[test]
    fn load_empty_name() {
        let store = opened_store();
        let result = store.load("");
        assert!(OutcomeExt::message(&result).contains("document name expected"));
        assert!(OutcomeExt::data(&result).is_none());
    }

    #[test]
    fn load_missing() {
        let store = opened_store();
        let err = store.load("nope").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn save_replaces_existing() {
        let mut store = opened_store();
        store.save(doc("d", b"old content")).unwrap();
        store.save(doc("d", b"new")).unwrap();

        assert_eq!(store.count(), 1);
        assert_eq!(store.load("d").unwrap().data().content(), b"new");
    }

    #[test]
    fn save_accepts_any_nonempty_name() {
        let mut store = opened_store();
        store.save(doc("a*b?", b"x")).unwrap();
        assert!(store.has_document("a*b?"));
    }

    #[test]
    fn has_document_empty_name() {
        let mut store = opened_store();
        store.save(doc("d", b"")).unwrap();
        assert!(!store.has_document(""));
        assert!(store.has_document("d"));
        assert!(!store.has_document("e"));
    }

    #[test]
    fn documents_in_insertion_order() {
        let mut store = opened_store();
        store.save(doc("b", b"1")).unwrap();
        store.save(doc("a", b"2")).unwrap();
        store.save(doc("c", b"3")).unwrap();
        store.save(doc("b", b"4")).unwrap();

        let names: Vec<String> = store.documents().map(|d| d.name().to_string()).collect();
        assert_eq!(names, ["a", "c", "b"]);
    }

    #[test]
    fn rename_moves_content() {
        let mut store = opened_store();
        store.save(doc("a", b"payload")).unwrap();

        let result = store.rename("a", "b");
        assert!(result.is_ok());
        assert!(!store.has_document("a"));
        assert!(store.has_document("b"));

        let loaded = store.load("b").unwrap().into_data();
        assert_eq!(loaded.name(), "b");
        assert_eq!(loaded.content(), b"payload");
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn rename_missing_source() {
        let mut store = opened_store();
        let err = store.rename("a", "b").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn rename_to_existing_has_no_side_effects() {
        let mut store = opened_store();
        store.save(doc("a", b"A")).unwrap();
        store.save(doc("b", b"B")).unwrap();

        let err = store.rename("a", "b").unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(store.load("a").unwrap().data().content(), b"A");
        assert_eq!(store.load("b").unwrap().data().content(), b"B");
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn delete_removes_document() {
        let mut store = opened_store();
        store.save(doc("d", b"x")).unwrap();

        assert!(store.delete("d").is_ok());
        assert!(!store.has_document("d"));
        assert!(store.delete("d").unwrap_err().is_not_found());
    }

    #[test]
    fn debug_format() {
        let store = opened_store();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryStore"));
        assert!(debug.contains("document_count"));
    }
}
