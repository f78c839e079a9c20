//! Name validation for filesystem-backed stores.
//!
//! Document names become file names, so they must be a single path
//! component the platform accepts:
//! - Must be non-empty and not only whitespace
//! - Must not contain `*`, `?` or a platform-reserved file name character
//! - Must not be `.` or `..`
//! - Must not look like a staging file (`.~*.tmp`)
//!
//! Store names and locations become directory paths and are checked with
//! the looser path rules at construction time.

use crate::error::{ConfigError, StoreError};

/// Prefix of the staging files the on-disk store writes before a rename.
pub(crate) const STAGING_PREFIX: &str = ".~";
/// Suffix of the staging files the on-disk store writes before a rename.
pub(crate) const STAGING_SUFFIX: &str = ".tmp";

/// Wildcards rejected everywhere.
const WILDCARDS: &[char] = &['*', '?'];

#[cfg(windows)]
const RESERVED_FILE_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|'];
#[cfg(not(windows))]
const RESERVED_FILE_CHARS: &[char] = &['/'];

#[cfg(windows)]
const RESERVED_PATH_CHARS: &[char] = &['<', '>', '"', '|'];
#[cfg(not(windows))]
const RESERVED_PATH_CHARS: &[char] = &[];

fn is_invalid_file_char(ch: char) -> bool {
    ch == '\0'
        || WILDCARDS.contains(&ch)
        || RESERVED_FILE_CHARS.contains(&ch)
        || (cfg!(windows) && ch.is_control())
}

fn is_invalid_path_char(ch: char) -> bool {
    ch == '\0'
        || WILDCARDS.contains(&ch)
        || RESERVED_PATH_CHARS.contains(&ch)
        || (cfg!(windows) && ch.is_control())
}

/// Returns `true` if `name` matches the staging file pattern.
pub(crate) fn is_staging_name(name: &str) -> bool {
    name.len() > STAGING_PREFIX.len() + STAGING_SUFFIX.len()
        && name.starts_with(STAGING_PREFIX)
        && name.ends_with(STAGING_SUFFIX)
}

/// Validate a document name for a filesystem-backed store.
///
/// # Examples
///
/// ```
/// use docstore_core::names::validate_document_name;
///
/// assert!(validate_document_name("report.pdf").is_ok());
/// assert!(validate_document_name("").is_err());
/// assert!(validate_document_name("a*b").is_err());
/// ```
pub fn validate_document_name(name: &str) -> Result<(), StoreError> {
    if name.trim().is_empty() {
        return Err(StoreError::NameExpected);
    }

    if let Some(ch) = name.chars().find(|&ch| is_invalid_file_char(ch)) {
        return Err(StoreError::InvalidCharacter {
            name: name.to_string(),
            ch,
        });
    }

    if name == "." || name == ".." || is_staging_name(name) {
        return Err(StoreError::ReservedName {
            name: name.to_string(),
        });
    }

    Ok(())
}

/// Validate a store name. May contain path separators (nested stores).
pub fn validate_store_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::StoreNameExpected);
    }
    match name.chars().find(|&ch| is_invalid_path_char(ch)) {
        Some(ch) => Err(ConfigError::InvalidStoreName {
            name: name.to_string(),
            ch,
        }),
        None => Ok(()),
    }
}

/// Validate a store location (the parent directory of the store).
pub fn validate_location(location: &str) -> Result<(), ConfigError> {
    if location.trim().is_empty() {
        return Err(ConfigError::LocationExpected);
    }
    match location.chars().find(|&ch| is_invalid_path_char(ch)) {
        Some(ch) => Err(ConfigError::InvalidLocation {
            location: location.to_string(),
            ch,
        }),
        None => Ok(()),
    }
}
