//! Transport port

use async_trait::async_trait;
use thiserror::Error;
use vigil_domain::{ApiCall, RequestOutcome};

/// Errors a transport adapter can surface.
///
/// The harness never lets these cross the check boundary raw; the check
/// context downgrades them into status-0 outcomes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The assembled URL is invalid.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The call exceeded the per-call timeout.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// The timeout that fired, in milliseconds.
        timeout_ms: u64,
    },

    /// The server refused the connection.
    #[error("connection refused by {host}")]
    ConnectionRefused {
        /// Host that refused.
        host: String,
    },

    /// Hostname resolution failed.
    #[error("DNS resolution failed for {host}: {message}")]
    Dns {
        /// Host that failed to resolve.
        host: String,
        /// Resolver error text.
        message: String,
    },

    /// The connection could not be established for another reason.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Decode(String),

    /// Any other client-side failure.
    #[error("{0}")]
    Other(String),
}

/// Port for issuing HTTP calls against the server under test.
///
/// This trait abstracts the HTTP client implementation, allowing the
/// harness to be driven by a mock in tests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues a single call and returns the decoded outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails due to network issues,
    /// timeout, or a body that cannot be read.
    async fn request(&self, call: &ApiCall) -> Result<RequestOutcome, TransportError>;
}
