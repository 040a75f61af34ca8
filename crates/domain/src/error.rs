//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The configured base URL is invalid or malformed.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The debug-endpoint key is empty.
    #[error("debug key must not be empty")]
    MissingDebugKey,

    /// The per-call timeout is zero.
    #[error("timeout must be at least one second")]
    ZeroTimeout,
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
