//! Error types for taskmaster
//!
//! Store operations never fail: unknown ids degrade to no-ops and unreadable
//! persisted data degrades to an empty board. These errors come from the
//! collaborators around the store (config, slot I/O, form validation and the
//! ordering checker).

use thiserror::Error;

use crate::task::TaskStatus;

/// Main error type for taskmaster operations
#[derive(Error, Debug)]
pub enum Error {
    // Input errors
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Invariant violations
    #[error("Order of {status} column is not dense: expected {expected}, found {found}")]
    DenseOrderViolated {
        status: TaskStatus,
        expected: usize,
        found: usize,
    },

    #[error("Duplicate task id: {0}")]
    DuplicateId(String),

    // Storage failures
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Error {
    /// True for errors caused by what the caller passed in, as opposed to
    /// storage or invariant failures.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Error::InvalidArgument(_) | Error::InvalidConfig(_))
    }
}

/// Result type alias for taskmaster operations
pub type Result<T> = std::result::Result<T, Error>;
