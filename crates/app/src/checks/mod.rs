//! Smoke-check bodies.
//!
//! Each function here is one declared check: it issues calls through the
//! context, evaluates the response against the endpoint's contract, and
//! returns a verdict. Names and run order are declared in [`crate::suite`].

mod checkout;
mod credits;
mod health;
mod optimize;

pub use checkout::{checkout_auth_gate, package_catalog, retired_package_rejected};
pub use credits::{debug_endpoint_enabled, fetch_credits_gating, grant_credits, ledger_arithmetic};
pub use health::{health, health_probe};
pub use optimize::{optimization_history_gating, optimize_auth_gate};

use vigil_domain::{Evaluation, RequestOutcome, Verdict};

/// Converts an evaluation into a verdict, attaching the response body as a
/// snapshot when the evaluation failed.
pub(crate) fn verdict_with_snapshot(evaluation: Evaluation, outcome: &RequestOutcome) -> Verdict {
    let verdict = Verdict::from(evaluation);
    if verdict.passed {
        return verdict;
    }
    match outcome.snapshot() {
        Some(snapshot) => verdict.with_snapshot(snapshot),
        None => verdict,
    }
}
