//! # Store Errors
//!
//! Error types for the tabular store load path.

use thiserror::Error;

/// Result type for store operations
pub type DataResult<T> = Result<T, DataSourceError>;

/// Errors raised while loading the backing dataset.
///
/// These are fatal for the request that triggered the load but must never
/// crash the process; callers decide whether to degrade or surface them.
#[derive(Debug, Clone, Error)]
pub enum DataSourceError {
    /// Backing file is missing or unreadable
    #[error("failed to read dataset {path}: {reason}")]
    Unreadable { path: String, reason: String },

    /// Backing file exists but its contents are not a valid dataset
    #[error("malformed dataset {path}: {reason}")]
    Malformed { path: String, reason: String },
}

impl DataSourceError {
    pub fn unreadable(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unreadable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
