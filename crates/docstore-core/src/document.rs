use crate::error::StoreError;

/// A named blob of bytes.
///
/// Documents are immutable: renaming or changing content always produces a
/// new `Document` that replaces the old store entry.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Document {
    name: String,
    content: Vec<u8>,
}

impl Document {
    /// Create a document. An empty name is rejected; empty content is fine.
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Result<Self, StoreError> {
        let name = name.into();
        if name.is_empty() {
            return Err(StoreError::NameExpected);
        }
        Ok(Self {
            name,
            content: content.into(),
        })
    }

    /// A document named `"empty"` with no content.
    pub fn empty() -> Self {
        Self {
            name: "empty".to_string(),
            content: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Content size in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn into_content(self) -> Vec<u8> {
        self.content
    }

    /// Same content under another name. The caller guarantees `name` is
    /// non-empty.
    pub(crate) fn renamed(&self, name: &str) -> Self {
        Self {
            name: name.to_string(),
            content: self.content.clone(),
        }
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("name", &self.name)
            .field("len", &self.content.len())
            .finish()
    }
}
