//! Shared error types for the insights system

use thiserror::Error;

use crate::query::Collection;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Invalid UUID: {input}")]
    InvalidUuid { input: String },

    #[error("Invalid role: {input}")]
    InvalidRole { input: String },
}

/// Failure signalled by a record store.
///
/// Stores classify their own faults; callers branch on the variant and never
/// inspect the message text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Unique constraint violated on {key}")]
    Conflict { key: String },

    #[error("No {collection} record for {key}")]
    NotFound { collection: Collection, key: String },

    #[error("Store temporarily unavailable: {message}")]
    Transient { message: String },

    #[error("Store rejected the request: {message}")]
    Permanent { message: String },
}

impl StoreError {
    pub fn conflict(key: impl Into<String>) -> Self {
        Self::Conflict { key: key.into() }
    }

    pub fn not_found(collection: Collection, key: impl Into<String>) -> Self {
        Self::NotFound {
            collection,
            key: key.into(),
        }
    }

    pub fn transient(message: impl Into<String>) -> Self {
        Self::Transient { message: message.into() }
    }

    pub fn permanent(message: impl Into<String>) -> Self {
        Self::Permanent { message: message.into() }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
