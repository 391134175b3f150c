//! Error taxonomy shared by all domain services.

use thiserror::Error;

/// Failure of a domain operation.
///
/// Every variant is recoverable: the caller corrects the input or retries.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed or out-of-range input, rejected before any store call
    #[error("validation failed: {0}")]
    Validation(String),

    /// The referenced record does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// The record store failed to read or write
    #[error("store failure: {0}")]
    Store(#[from] anyhow::Error),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        DomainError::NotFound(what.into())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
