//! Core error types for studybalance-core.
//!
//! This module defines the error hierarchy using thiserror. All errors
//! are raised synchronously before any state mutation, so a failed
//! operation never leaves a partial write behind.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studybalance-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors (client fault)
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Backtest requested before enough history exists
    #[error("{0}")]
    InsufficientData(#[from] InsufficientDataError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

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

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Unknown key or unparsable value in a config update
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors. Surfaced to the caller as client faults.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Empty collection
    #[error("Empty collection: {0}")]
    EmptyCollection(String),

    /// Invalid value for a bounded field
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Malformed calendar date
    #[error("Invalid date '{value}': must be YYYY-MM-DD")]
    InvalidDate { value: String },

    /// Derived feature is NaN or infinite
    #[error("NaN/Inf detected in features")]
    NonFiniteFeature,

    /// Cluster labeling collapsed two clusters onto one label
    #[error("Cluster labeling is degenerate: labels {0:?} are not pairwise distinct")]
    DegenerateLabels([&'static str; 3]),
}

/// Not enough stored history for the requested evaluation.
#[derive(Error, Debug)]
#[error("Not enough data for accuracy. Need >= {required} days, have {available}.")]
pub struct InsufficientDataError {
    pub required: usize,
    pub available: usize,
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
