//! Error taxonomy for catalog mutation and persistence.
//!
//! # Responsibility
//! - Give callers one semantic error type for CRUD, load and save paths.
//! - Keep transport (I/O) failures distinguishable from data failures.
//!
//! # Invariants
//! - Lookups never produce `NotFound`; they return `Option` instead.
//!   `NotFound` is reserved for mutations that require an existing record.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Result type used by catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Hierarchy level a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyLevel {
    Category,
    SubCategory,
    Record,
}

impl Display for KeyLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Category => write!(f, "category"),
            Self::SubCategory => write!(f, "sub-category"),
            Self::Record => write!(f, "record"),
        }
    }
}

/// Errors from catalog operations.
#[derive(Debug)]
pub enum CatalogError {
    /// A record with this name already exists in the target sub-category.
    DuplicateKey {
        category: String,
        sub_category: String,
        name: String,
    },
    /// Persisted input could not be decoded. `line` is 1-based.
    CorruptData { line: usize, message: String },
    /// Underlying storage access failed. `path` is `None` for
    /// caller-supplied readers and writers.
    Io {
        path: Option<PathBuf>,
        source: std::io::Error,
    },
    /// Data file name does not have exactly one extension separator.
    InvalidFileName(PathBuf),
    /// Key is blank after trim.
    EmptyKey(KeyLevel),
    /// Mutation target does not exist.
    NotFound {
        category: String,
        sub_category: String,
        name: String,
    },
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateKey {
                category,
                sub_category,
                name,
            } => write!(
                f,
                "record `{name}` already exists in `{category}/{sub_category}`"
            ),
            Self::CorruptData { line, message } => {
                write!(f, "corrupt data at line {line}: {message}")
            }
            Self::Io {
                path: Some(path),
                source,
            } => write!(f, "{}: {source}", path.display()),
            Self::Io { path: None, source } => write!(f, "{source}"),
            Self::InvalidFileName(path) => write!(
                f,
                "invalid data file name `{}`: expected exactly one `.` separator",
                path.display()
            ),
            Self::EmptyKey(level) => write!(f, "{level} name must not be blank"),
            Self::NotFound {
                category,
                sub_category,
                name,
            } => write!(
                f,
                "record `{name}` not found in `{category}/{sub_category}`"
            ),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::DuplicateKey { .. } => None,
            Self::CorruptData { .. } => None,
            Self::InvalidFileName(_) => None,
            Self::EmptyKey(_) => None,
            Self::NotFound { .. } => None,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(value: std::io::Error) -> Self {
        Self::Io {
            path: None,
            source: value,
        }
    }
}

impl CatalogError {
    /// Stable machine-readable code for log lines. Never carries record
    /// content.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateKey { .. } => "duplicate_key",
            Self::CorruptData { .. } => "corrupt_data",
            Self::Io { .. } => "io_failure",
            Self::InvalidFileName(_) => "invalid_file_name",
            Self::EmptyKey(_) => "empty_key",
            Self::NotFound { .. } => "not_found",
        }
    }

    pub(crate) fn io_at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: Some(path.into()),
            source,
        }
    }

    pub(crate) fn not_found(category: &str, sub_category: &str, name: &str) -> Self {
        Self::NotFound {
            category: category.to_string(),
            sub_category: sub_category.to_string(),
            name: name.to_string(),
        }
    }

    pub(crate) fn duplicate(category: &str, sub_category: &str, name: &str) -> Self {
        Self::DuplicateKey {
            category: category.to_string(),
            sub_category: sub_category.to_string(),
            name: name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CatalogError, KeyLevel};

    #[test]
    fn codes_do_not_leak_key_names() {
        let err = CatalogError::duplicate("Secret", "Shelf", "Box");
        assert_eq!(err.code(), "duplicate_key");
        assert!(err.to_string().contains("Secret"));
        assert!(!err.code().contains("Secret"));

        assert_eq!(CatalogError::not_found("a", "b", "c").code(), "not_found");
        assert_eq!(CatalogError::EmptyKey(KeyLevel::Record).code(), "empty_key");
    }
}
