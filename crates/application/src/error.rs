//! Application error types

use thiserror::Error;
use vigil_domain::DomainError;

use crate::ports::TransportError;

/// Application-level errors.
///
/// A check body returning one of these trips the runner's fault boundary:
/// the run records an `Errored` result and moves on.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// A transport call failed outside the downgrade path.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// An unexpected fault inside a check body.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
