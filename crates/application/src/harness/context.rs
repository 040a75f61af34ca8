//! Shared context handed to every check body.

use std::sync::Arc;

use vigil_domain::{ApiCall, HarnessConfig, RequestOutcome};

use crate::ports::Transport;

/// What a check body gets to work with: the injected transport and the
/// run configuration.
pub struct CheckContext {
    transport: Arc<dyn Transport>,
    config: HarnessConfig,
}

impl CheckContext {
    /// Creates a context over a transport and configuration.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, config: HarnessConfig) -> Self {
        Self { transport, config }
    }

    /// Returns the run configuration.
    #[must_use]
    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Issues a call, downgrading any transport fault to a status-0 outcome.
    ///
    /// This is the harness boundary from the error-handling design: a
    /// connection failure or timeout becomes an outcome the assertion layer
    /// treats as a mismatch, never a fault that aborts the run.
    pub async fn send(&self, call: ApiCall) -> RequestOutcome {
        match self.transport.request(&call).await {
            Ok(outcome) => {
                tracing::debug!(%call, status = outcome.status, "call completed");
                outcome
            }
            Err(fault) => {
                tracing::warn!(%call, %fault, "transport fault downgraded to status-0 outcome");
                RequestOutcome::failure(fault.to_string())
            }
        }
    }
}
