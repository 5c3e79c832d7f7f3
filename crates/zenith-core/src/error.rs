//! Core error types for zenith-core.
//!
//! Every error here is recoverable: the rejected action leaves state
//! untouched and the caller surfaces a transient notice.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for zenith-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Content store errors (rosters and catalog lookups)
    #[error(transparent)]
    Content(#[from] ContentError),

    /// Timer engine errors
    #[error(transparent)]
    Timer(#[from] TimerError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Content store errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// Event or resource id absent from the catalog
    #[error("No such entry in the catalog: {id}")]
    NotFound { id: String },

    /// Cancel requested for an event that was never RSVP'd
    #[error("Event {id} is not in your schedule")]
    NotInSchedule { id: String },

    /// Goal text already present verbatim
    #[error("Goal already exists: {goal}")]
    DuplicateGoal { goal: String },

    /// Goal text is blank
    #[error("Goal cannot be empty")]
    EmptyGoal,

    /// Goal index past the end of the list
    #[error("Index {index} out of range for goals (length: {len})")]
    OutOfRange { index: usize, len: usize },
}

/// Timer engine errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    #[error("{field} time must be between {min} and {max} minutes (got {minutes})")]
    InvalidDuration {
        field: &'static str,
        minutes: u32,
        min: u32,
        max: u32,
    },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration or content seed
    #[error("Failed to load {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to parse configuration or content seed
    #[error("Failed to parse: {0}")]
    ParseFailed(String),

    /// Parsed but out of range
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
