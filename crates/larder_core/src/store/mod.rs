//! On-disk persistence for the inventory.
//!
//! # Responsibility
//! - Serialize the three registries into one JSON document and back.
//! - Keep file-format and I/O failures inside this boundary.
//!
//! # Invariants
//! - A malformed document is a hard failure and populates nothing.
//! - Saves are atomic: the target path never holds a half-written file.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod json_store;

pub use json_store::JsonStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence failures surfaced to the caller; the core never retries.
#[derive(Debug)]
pub enum StoreError {
    /// The store was configured with an empty path.
    EmptyPath,
    /// Reading, writing, or committing the file failed.
    Io(std::io::Error),
    /// The document is not valid JSON or not the expected shape.
    Json(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPath => write!(f, "store path must not be empty"),
            Self::Io(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "malformed inventory document: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EmptyPath => None,
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<tempfile::PersistError> for StoreError {
    fn from(value: tempfile::PersistError) -> Self {
        Self::Io(value.error)
    }
}
