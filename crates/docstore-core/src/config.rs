use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::archive::ArchivingStore;
use crate::disk::OnDiskStore;
use crate::error::ConfigError;
use crate::memory::InMemoryStore;
use crate::traits::DocumentsStore;

/// Which backend holds the documents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// One file per document under `location/name`.
    #[default]
    Disk,
    /// Process memory; contents are lost on exit.
    Memory,
}

/// Configuration of a documents store.
///
/// ```toml
/// backend = "disk"
/// location = "./data"
/// name = "documents"
/// archive = "archive"
/// sync_writes = false
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: Backend,
    /// Parent directory of the store directories (disk backend only).
    pub location: PathBuf,
    /// Name of the main store.
    pub name: String,
    /// When set, deletions move documents into a store with this name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive: Option<String>,
    /// `fsync` document content before it replaces the old version.
    pub sync_writes: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Disk,
            location: PathBuf::from("./data"),
            name: "documents".to_string(),
            archive: None,
            sync_writes: false,
        }
    }
}

impl StoreConfig {
    /// Parse a TOML configuration. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Construct the configured store. The store is returned closed.
    pub fn build_store(&self) -> Result<Box<dyn DocumentsStore>, ConfigError> {
        let master = self.backend_store(&self.name)?;
        match &self.archive {
            Some(archive) if *archive == self.name => Err(ConfigError::ArchiveIsMaster {
                name: archive.clone(),
            }),
            Some(archive) => {
                let archive = self.backend_store(archive)?;
                Ok(Box::new(ArchivingStore::new(master, archive)))
            }
            None => Ok(master),
        }
    }

    fn backend_store(&self, name: &str) -> Result<Box<dyn DocumentsStore>, ConfigError> {
        Ok(match self.backend {
            Backend::Disk => Box::new(
                OnDiskStore::new(name, &self.location)?.sync_writes(self.sync_writes),
            ),
            Backend::Memory => Box::new(InMemoryStore::new(name)?),
        })
    }
}
