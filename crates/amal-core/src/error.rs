//! Core error types for amal-core.
//!
//! One thiserror hierarchy rooted at [`CoreError`]; repository and engine
//! operations return `Result<T>` with this error at the top.

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

use crate::exclusion::ExclusionReason;

/// Crate-wide result alias.
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

/// Core error type for amal-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Backup snapshot errors
    #[error("Backup error: {0}")]
    Backup(#[from] BackupError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Tracking is suspended for the given date by an exclusion period
    #[error("Tracking suspended on {date}: {reason}")]
    DateExcluded {
        date: NaiveDate,
        reason: ExclusionReason,
    },
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the store
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Underlying SQLite operation failed
    #[error("Store operation failed: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Persisted value under a key is not valid JSON for its collection.
    /// Recoverable: the caller may clear the key and reseed defaults.
    #[error("Corrupt state under key '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A collection could not be encoded for persistence
    #[error("Failed to encode value for key '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Data directory could not be resolved or created
    #[error("Data directory error: {0}")]
    DataDir(String),
}

/// Backup snapshot errors.
#[derive(Error, Debug)]
pub enum BackupError {
    /// Snapshot is not parseable JSON
    #[error("Snapshot parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    /// Snapshot is missing a required collection
    #[error("Snapshot is missing required field '{0}'")]
    MissingField(&'static str),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Exclusion period end precedes its start
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// A required name field is empty
    #[error("Name must not be empty")]
    EmptyName,
}
