//! Insights-specific error types

use shared::{SharedError, StoreError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsightsError {
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Transient store failure: {message}")]
    Transient { message: String },

    #[error("Permanent store failure: {message}")]
    Permanent { message: String },

    #[error("Configuration error: {field} = {value}")]
    Config { field: String, value: String },

    #[error("Shared component error")]
    Shared(#[from] SharedError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl InsightsError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn config(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Config {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl From<StoreError> for InsightsError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Conflict { key } => Self::Conflict {
                message: format!("unique constraint on {key}"),
            },
            StoreError::Transient { message } => Self::Transient { message },
            StoreError::Permanent { message } => Self::Permanent { message },
            not_found @ StoreError::NotFound { .. } => Self::Permanent {
                message: not_found.to_string(),
            },
        }
    }
}

/// Whether a failed attempt is worth repeating
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

impl Retryable for InsightsError {
    fn is_retryable(&self) -> bool {
        matches!(self, InsightsError::Transient { .. })
    }
}

impl Retryable for StoreError {
    fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Transient { .. })
    }
}

pub type InsightsResult<T> = Result<T, InsightsError>;
