//! End-of-run aggregation.

use serde::{Deserialize, Serialize};

use crate::check::{CheckResult, CheckStatus};

/// Declares a named aggregate derived from the result log.
///
/// A critical check is satisfied when at least one result whose name starts
/// with the prefix passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalSpec {
    /// Display label, e.g. "Database writes succeed".
    pub label: String,
    /// Name prefix to scan for, e.g. "4.".
    pub prefix: String,
}

impl CriticalSpec {
    /// Creates a critical-check declaration.
    #[must_use]
    pub fn new(label: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            prefix: prefix.into(),
        }
    }
}

/// Evaluated critical check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalCheck {
    /// Display label.
    pub label: String,
    /// Whether a passing result matched the prefix.
    pub satisfied: bool,
}

/// Aggregate verdict computed once at end-of-run from the result log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of checks attempted.
    pub total: usize,
    /// Number that passed.
    pub passed: usize,
    /// Number that failed an assertion.
    pub failed: usize,
    /// Number that faulted inside the check body.
    pub errored: usize,
    /// Evaluated critical checks, in declaration order.
    pub critical: Vec<CriticalCheck>,
}

impl RunSummary {
    /// Computes the summary from the result log.
    #[must_use]
    pub fn compute(results: &[CheckResult], critical: &[CriticalSpec]) -> Self {
        let passed = results.iter().filter(|r| r.passed()).count();
        let errored = results
            .iter()
            .filter(|r| matches!(r.status, CheckStatus::Errored { .. }))
            .count();
        let critical = critical
            .iter()
            .map(|spec| CriticalCheck {
                label: spec.label.clone(),
                satisfied: results
                    .iter()
                    .any(|r| r.name.starts_with(&spec.prefix) && r.passed()),
            })
            .collect();

        Self {
            total: results.len(),
            passed,
            failed: results.len() - passed - errored,
            errored,
            critical,
        }
    }

    /// Returns true if every check passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.passed == self.total
    }

    /// Pass rate as a percentage.
    #[must_use]
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            {
                (self.passed as f64 / self.total as f64) * 100.0
            }
        }
    }
}
