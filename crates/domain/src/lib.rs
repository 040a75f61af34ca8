//! Vigil Domain - Core harness types
//!
//! This crate defines the domain model for the Vigil smoke-test harness.
//! All types here are pure Rust with no I/O dependencies.

pub mod call;
pub mod check;
pub mod classify;
pub mod config;
pub mod error;
pub mod expect;
pub mod outcome;
pub mod summary;

pub use call::{ApiCall, HttpMethod};
pub use check::{CheckResult, CheckStatus, Verdict};
pub use classify::{ResponseClass, classify};
pub use config::HarnessConfig;
pub use error::{DomainError, DomainResult};
pub use expect::{Evaluation, Expectation, StatusRule, evaluate_all};
pub use outcome::{BodyValue, RequestOutcome};
pub use summary::{CriticalCheck, CriticalSpec, RunSummary};
