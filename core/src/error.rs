//! Errors raised by the tracker core.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    /// Rejected user input: empty names, non-numeric or out-of-range numbers.
    #[error("{0}")]
    Validation(String),

    #[error("'{0}' not found in food database. Please add it first.")]
    FoodNotFound(String),

    /// A persisted store could not be read or written, or its contents are corrupt.
    #[error("Storage error in {}: {reason}", path.display())]
    Storage { path: PathBuf, reason: String },
}

impl TrackerError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn storage(path: &Path, reason: impl ToString) -> Self {
        Self::Storage {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    #[must_use]
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage { .. })
    }
}

pub type Result<T, E = TrackerError> = std::result::Result<T, E>;
