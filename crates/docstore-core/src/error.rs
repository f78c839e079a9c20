use std::path::PathBuf;

/// Errors returned by document operations on an opened or closed store.
///
/// Every fallible store operation reports through this type; none of them
/// panic. The `Display` text is the human-readable message callers show.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The document name argument was empty.
    #[error("document name expected")]
    NameExpected,

    /// The target name of a rename was empty.
    #[error("new document name expected")]
    NewNameExpected,

    /// The document name contains a character the backend cannot store.
    #[error("invalid character {ch:?} in document name '{name}'")]
    InvalidCharacter { name: String, ch: char },

    /// The document name is reserved by the backend.
    #[error("reserved document name '{name}'")]
    ReservedName { name: String },

    /// The store has not been opened (or was closed).
    #[error("documents store '{store}' is not opened")]
    NotOpened { store: String },

    /// No document with this name exists in the store.
    #[error("document '{name}' not found")]
    NotFound { name: String },

    /// A rename target is already taken.
    #[error("document '{name}' already exists")]
    AlreadyExists { name: String },

    /// The old entry of a rename could not be removed; the new entry was
    /// rolled back.
    #[error("document '{name}' cannot be removed from documents store '{store}'")]
    RemoveFailed { store: String, name: String },

    /// A filesystem path argument was empty.
    #[error("path expected")]
    PathExpected,

    /// An external file used by an import was not found.
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Underlying I/O failure.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Free-form failure, used by stores outside this crate.
    #[error("{0}")]
    Other(String),
}

impl StoreError {
    /// Wrap an I/O error with a description of what was being attempted.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a free-form error. The message defaults to `"Error"`.
    pub fn other(message: Option<&str>) -> Self {
        Self::Other(message.unwrap_or("Error").to_string())
    }

    /// Create a not-opened error for the named store.
    pub fn not_opened(store: impl Into<String>) -> Self {
        Self::NotOpened {
            store: store.into(),
        }
    }

    /// Create a not-found error for the named document.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Returns `true` for a missing-document error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors in store construction or configuration.
///
/// These describe setup defects rather than data conditions, so they are
/// kept apart from [`StoreError`] and surface from constructors only.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("documents store name expected")]
    StoreNameExpected,

    #[error("documents store location expected")]
    LocationExpected,

    #[error("invalid character {ch:?} in documents store name '{name}'")]
    InvalidStoreName { name: String, ch: char },

    #[error("invalid character {ch:?} in documents store location '{location}'")]
    InvalidLocation { location: String, ch: char },

    #[error("archive store '{name}' must differ from the main store")]
    ArchiveIsMaster { name: String },

    #[error("cannot read configuration {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("configuration cannot be serialized: {0}")]
    Serialize(#[from] toml::ser::Error),
}
