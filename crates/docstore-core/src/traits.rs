use crate::document::Document;
use crate::outcome::StoreResult;

/// Lazy sequence of the documents visible in a store.
pub type Documents<'a> = Box<dyn Iterator<Item = Document> + 'a>;

/// A named, lifecycle-gated collection of documents.
///
/// All implementations must satisfy these invariants:
/// - A store is constructed closed. `open` and `close` are idempotent.
/// - While closed, no document is visible: `count` is 0, `documents` is
///   empty, `has_document` is `false`, and every other operation fails with
///   a not-opened error without touching storage.
/// - Closing never discards persisted documents; reopening makes them
///   visible again.
/// - Name-argument errors are reported before the opened check.
/// - Operations report failure through [`StoreResult`] and never panic.
pub trait DocumentsStore {
    /// The store's identity, fixed at construction.
    fn name(&self) -> &str;

    /// Number of visible documents; 0 when closed.
    fn count(&self) -> usize;

    fn is_opened(&self) -> bool;

    /// Enumerate the visible documents.
    ///
    /// Each call starts a fresh enumeration. The sequence is empty when the
    /// store is closed.
    fn documents(&self) -> Documents<'_>;

    /// Open the store, creating its backing storage if needed.
    ///
    /// Opening an opened store succeeds without doing anything. On failure
    /// the store stays closed.
    fn open(&mut self) -> StoreResult;

    /// Close the store. Always succeeds.
    fn close(&mut self);

    /// `true` only if the store is opened and holds a document named `name`.
    fn has_document(&self, name: &str) -> bool;

    /// Load the document named `name`.
    fn load(&self, name: &str) -> StoreResult<Document>;

    /// Insert or fully replace a document.
    ///
    /// The success message names the saved document.
    fn save(&mut self, document: Document) -> StoreResult;

    /// Move a document to a new name that is not yet taken.
    ///
    /// On failure the store is left in its original state.
    fn rename(&mut self, name: &str, new_name: &str) -> StoreResult;

    /// Remove the document named `name`.
    fn delete(&mut self, name: &str) -> StoreResult;
}

macro_rules! forward_store {
    () => {
        fn name(&self) -> &str {
            (**self).name()
        }

        fn count(&self) -> usize {
            (**self).count()
        }

        fn is_opened(&self) -> bool {
            (**self).is_opened()
        }

        fn documents(&self) -> Documents<'_> {
            (**self).documents()
        }

        fn open(&mut self) -> StoreResult {
            (**self).open()
        }

        fn close(&mut self) {
            (**self).close()
        }

        fn has_document(&self, name: &str) -> bool {
            (**self).has_document(name)
        }

        fn load(&self, name: &str) -> StoreResult<Document> {
            (**self).load(name)
        }

        fn save(&mut self, document: Document) -> StoreResult {
            (**self).save(document)
        }

        fn rename(&mut self, name: &str, new_name: &str) -> StoreResult {
            (**self).rename(name, new_name)
        }

        fn delete(&mut self, name: &str) -> StoreResult {
            (**self).delete(name)
        }
    };
}

impl<S: DocumentsStore + ?Sized> DocumentsStore for &mut S {
    forward_store!();
}

impl<S: DocumentsStore + ?Sized> DocumentsStore for Box<S> {
    forward_store!();
}
