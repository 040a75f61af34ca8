//! The declared smoke suite.
//!
//! Order is fixed and hand-specified; the numeric name prefixes are what the
//! critical-check scan keys on, so renumbering means revisiting the
//! `CriticalSpec` declarations below.

use vigil_application::{Check, Suite};
use vigil_domain::CriticalSpec;

use crate::checks;

/// Builds the smoke suite in its declared order.
#[must_use]
pub fn smoke_suite() -> Suite {
    Suite::new("api-smoke")
        .with_check(Check::new("1. Health Check", |ctx| {
            Box::pin(checks::health(ctx))
        }))
        .with_check(Check::new("2. Health Probe (HEAD)", |ctx| {
            Box::pin(checks::health_probe(ctx))
        }))
        .with_check(Check::new("3. Debug Endpoint Enabled", |ctx| {
            Box::pin(checks::debug_endpoint_enabled(ctx))
        }))
        .with_check(Check::new("4. Grant Credits", |ctx| {
            Box::pin(checks::grant_credits(ctx))
        }))
        .with_check(Check::new("5. Ledger Arithmetic", |ctx| {
            Box::pin(checks::ledger_arithmetic(ctx))
        }))
        .with_check(Check::new("6. Fetch Credits Gating", |ctx| {
            Box::pin(checks::fetch_credits_gating(ctx))
        }))
        .with_check(Check::new("7.LAUNCH Checkout Auth Gate", |ctx| {
            Box::pin(checks::checkout_auth_gate(ctx, "launch"))
        }))
        .with_check(Check::new("8.SCALE Checkout Auth Gate", |ctx| {
            Box::pin(checks::checkout_auth_gate(ctx, "scale"))
        }))
        .with_check(Check::new("9.ELITE-LISTING Checkout Auth Gate", |ctx| {
            Box::pin(checks::checkout_auth_gate(ctx, "elite-listing"))
        }))
        .with_check(Check::new("10. Checkout Package Catalog", |ctx| {
            Box::pin(checks::package_catalog(ctx))
        }))
        .with_check(Check::new("11. Retired Package Rejected", |ctx| {
            Box::pin(checks::retired_package_rejected(ctx))
        }))
        .with_check(Check::new("12. Optimize Auth Gate", |ctx| {
            Box::pin(checks::optimize_auth_gate(ctx))
        }))
        .with_check(Check::new("13. Optimization History Gating", |ctx| {
            Box::pin(checks::optimization_history_gating(ctx))
        }))
        .with_critical(CriticalSpec::new("Server healthy", "1."))
        .with_critical(CriticalSpec::new("Database writes succeed", "4."))
        .with_critical(CriticalSpec::new("Database reads clean", "6."))
        .with_critical(CriticalSpec::new("Checkout catalog intact", "10."))
        .with_critical(CriticalSpec::new("Auth gating enforced", "12."))
}
