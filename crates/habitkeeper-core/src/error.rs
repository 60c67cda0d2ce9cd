//! Core error types for habitkeeper-core.
//!
//! Transport-level gateway failures are deliberately absent here: gateways
//! recover locally and hand back fallback values, so nothing in this
//! hierarchy describes a network problem.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for habitkeeper-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Record store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Domain-level habit errors
    #[error("{0}")]
    Habit(#[from] HabitError),

    /// User input validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Record store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read the habit file
    #[error("Failed to read habit data from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Habit file exists but does not parse
    #[error("Failed to parse habit data in {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to write the habit file
    #[error("Failed to write habit data to {path}: {message}")]
    WriteFailed { path: PathBuf, message: String },
}

/// Configuration errors.
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
}

/// Domain-level habit outcomes.
///
/// `AlreadyCompleted` is informational at the CLI layer, not a hard
/// failure; the other two abort the operation with no state change.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum HabitError {
    /// A habit with this name is already tracked (case-sensitive match)
    #[error("A habit named '{0}' already exists")]
    DuplicateName(String),

    /// No habit with this name is tracked
    #[error("No habit named '{0}' found")]
    NotFound(String),

    /// The habit already has a completion entry for this date
    #[error("'{0}' is already marked complete for today")]
    AlreadyCompleted(String),
}

/// User input validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Numeric input outside the accepted range
    #[error("Please enter a number between {min} and {max} {unit}")]
    OutOfRange { unit: String, min: u64, max: u64 },

    /// Input that should be numeric was not
    #[error("Invalid input. Please enter a number")]
    NotANumber,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
