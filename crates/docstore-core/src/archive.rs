//! Archiving composite: deletion moves documents into a second store.
//!
//! [`ArchivingStore`] wraps a master and an archive store. Everything except
//! `delete` goes to the master; `delete` becomes [`archive_document`], a
//! load/save/delete sequence across both stores with compensation when the
//! final step fails.

use tracing::{debug, warn};

use crate::document::Document;
use crate::error::StoreError;
use crate::outcome::{Outcome, StoreResult};
use crate::traits::{Documents, DocumentsStore};

/// Move a document from `store` into `archive`.
///
/// Steps:
/// 1. Load the document from `store`.
/// 2. Save it into `archive`, remembering any copy it replaces.
/// 3. Delete it from `store`.
///
/// A failure in step 1 or 2 is returned as is; nothing has been changed
/// yet. If step 3 fails, the archive is put back the way it was (the
/// replaced copy is restored, or the new copy deleted) and the delete error
/// is returned. A failure of that compensation is logged, not returned.
pub fn archive_document<S, A>(store: &mut S, name: &str, archive: &mut A) -> StoreResult
where
    S: DocumentsStore + ?Sized,
    A: DocumentsStore + ?Sized,
{
    if name.is_empty() {
        return Err(StoreError::NameExpected);
    }

    let document = store.load(name)?.into_data();
    let replaced = if archive.has_document(name) {
        archive.load(name).ok().map(Outcome::into_data)
    } else {
        None
    };

    archive.save(document)?;

    if let Err(delete_error) = store.delete(name) {
        compensate(archive, name, replaced);
        return Err(delete_error);
    }

    debug!(
        document = name,
        from = store.name(),
        to = archive.name(),
        "document archived"
    );
    Ok(Outcome::with_message(format!(
        "document '{name}' archived to documents store '{}'",
        archive.name()
    )))
}

fn compensate<A>(archive: &mut A, name: &str, replaced: Option<Document>)
where
    A: DocumentsStore + ?Sized,
{
    let undo = match replaced {
        Some(previous) => archive.save(previous),
        None => archive.delete(name),
    };
    if let Err(e) = undo {
        warn!(
            document = name,
            archive = archive.name(),
            error = %e,
            "cannot restore archive after failed delete"
        );
    }
}

/// Documents store that archives documents instead of deleting them.
///
/// Both wrapped stores are closed on construction. The composite counts as
/// opened only while both are opened, and `open` never leaves the master
/// opened on its own.
pub struct ArchivingStore<M, A> {
    master: M,
    archive: A,
}

impl<M: DocumentsStore, A: DocumentsStore> ArchivingStore<M, A> {
    pub fn new(mut master: M, mut archive: A) -> Self {
        master.close();
        archive.close();
        Self { master, archive }
    }

    pub fn master(&self) -> &M {
        &self.master
    }

    pub fn archive(&self) -> &A {
        &self.archive
    }

    pub fn master_mut(&mut self) -> &mut M {
        &mut self.master
    }

    pub fn archive_mut(&mut self) -> &mut A {
        &mut self.archive
    }

    /// Give back the wrapped stores.
    pub fn into_inner(self) -> (M, A) {
        (self.master, self.archive)
    }
}

impl<M: DocumentsStore, A: DocumentsStore> DocumentsStore for ArchivingStore<M, A> {
    fn name(&self) -> &str {
        self.master.name()
    }

    fn count(&self) -> usize {
        self.master.count()
    }

    fn is_opened(&self) -> bool {
        self.master.is_opened() && self.archive.is_opened()
    }

    fn documents(&self) -> Documents<'_> {
        self.master.documents()
    }

    fn open(&mut self) -> StoreResult {
        self.master.open()?;

        if let Err(e) = self.archive.open() {
            self.master.close();
            return Err(e);
        }

        Ok(Outcome::with_message(format!(
            "archiving documents store '{}' opened over '{}' and '{}'",
            self.name(),
            self.master.name(),
            self.archive.name()
        )))
    }

    fn close(&mut self) {
        self.master.close();
        self.archive.close();
    }

    fn has_document(&self, name: &str) -> bool {
        self.master.has_document(name)
    }

    fn load(&self, name: &str) -> StoreResult<Document> {
        self.master.load(name)
    }

    fn save(&mut self, document: Document) -> StoreResult {
        self.master.save(document)
    }

    fn rename(&mut self, name: &str, new_name: &str) -> StoreResult {
        self.master.rename(name, new_name)
    }

    fn delete(&mut self, name: &str) -> StoreResult {
        archive_document(&mut self.master, name, &mut self.archive)
    }
}

impl<M: DocumentsStore, A: DocumentsStore> std::fmt::Debug for ArchivingStore<M, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchivingStore")
            .field("master", &self.master.name())
            .field("archive", &self.archive.name())
            .field("opened", &self.is_opened())
            .finish()
    }
}
