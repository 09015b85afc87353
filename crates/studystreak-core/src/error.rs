//! Core error types for studystreak-core.
//!
//! Plain reads recover storage failures inside the tracker. Marking a day
//! surfaces them instead, alongside failed writes, rejected input and
//! configuration problems.

use std::path::PathBuf;
use thiserror::Error;

use chrono::NaiveDate;

/// Core error type for studystreak-core.
#[derive(Error, Debug)]
pub enum StreakError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Window construction errors
    #[error("Invalid window: {0}")]
    Window(#[from] WindowError),

    /// Hours value that cannot be recorded
    #[error("Invalid study hours {value}: must be a finite, non-negative number")]
    InvalidHours { value: f64 },

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing database
    #[error("Failed to open database at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Schema migration failed
    #[error("Database migration failed: {0}")]
    Migration(String),

    /// Reading a key failed
    #[error("Failed to read '{key}': {message}")]
    ReadFailed { key: String, message: String },

    /// Writing a key failed
    #[error("Failed to write '{key}': {message}")]
    WriteFailed { key: String, message: String },

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Data directory could not be prepared
    #[error("Data directory unavailable at {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Violations of the window shape.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum WindowError {
    /// Wrong number of records
    #[error("expected {expected} days, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    /// Two neighbouring records are not one day apart
    #[error("dates not contiguous: {previous} is followed by {next}")]
    Gap { previous: NaiveDate, next: NaiveDate },

    /// Hours that are negative, non-finite or set on an unstudied day
    #[error("invalid study hours on {date}")]
    InvalidHours { date: NaiveDate },
}

impl StorageError {
    /// Classify a failed read of `key`.
    pub(crate) fn read(key: &str, err: rusqlite::Error) -> Self {
        if is_locked(&err) {
            return StorageError::Locked;
        }
        StorageError::ReadFailed {
            key: key.to_string(),
            message: err.to_string(),
        }
    }

    /// Classify a failed write of `key`.
    pub(crate) fn write(key: &str, err: rusqlite::Error) -> Self {
        if is_locked(&err) {
            return StorageError::Locked;
        }
        StorageError::WriteFailed {
            key: key.to_string(),
            message: err.to_string(),
        }
    }
}

fn is_locked(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::DatabaseBusy
                || e.code == rusqlite::ErrorCode::DatabaseLocked
    )
}

/// Result type alias for StreakError
pub type Result<T, E = StreakError> = std::result::Result<T, E>;
