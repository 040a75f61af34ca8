//! Check outcomes and the immutable result record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What a check body reports on a non-faulting path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether the check's contract held.
    pub passed: bool,
    /// Human-readable explanation.
    pub detail: String,
    /// Response body captured for the report, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<Value>,
}

impl Verdict {
    /// Creates a passing verdict.
    #[must_use]
    pub fn pass(detail: impl Into<String>) -> Self {
        Self {
            passed: true,
            detail: detail.into(),
            snapshot: None,
        }
    }

    /// Creates a failing verdict.
    #[must_use]
    pub fn fail(detail: impl Into<String>) -> Self {
        Self {
            passed: false,
            detail: detail.into(),
            snapshot: None,
        }
    }

    /// Attaches a response snapshot (builder pattern).
    #[must_use]
    pub fn with_snapshot(mut self, snapshot: Value) -> Self {
        self.snapshot = Some(snapshot);
        self
    }
}

impl From<crate::expect::Evaluation> for Verdict {
    fn from(evaluation: crate::expect::Evaluation) -> Self {
        Self {
            passed: evaluation.passed,
            detail: evaluation.detail,
            snapshot: None,
        }
    }
}

/// Terminal state of one executed check.
///
/// `Errored` is distinct from `Failed`: it marks a fault inside the check
/// body (not a contract violation), converted by the runner's fault boundary
/// instead of aborting the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckStatus {
    /// Every assertion held.
    Passed {
        /// Explanation of what was verified.
        detail: String,
    },
    /// An assertion did not hold.
    Failed {
        /// Explanation of the mismatch.
        detail: String,
    },
    /// The check body faulted before producing a verdict.
    Errored {
        /// Description of the fault.
        fault: String,
    },
}

impl CheckStatus {
    /// Returns true only for `Passed`.
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed { .. })
    }

    /// Returns the explanation regardless of variant.
    #[must_use]
    pub fn detail(&self) -> &str {
        match self {
            Self::Passed { detail } | Self::Failed { detail } => detail,
            Self::Errored { fault } => fault,
        }
    }

    /// Short label for report lines.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Passed { .. } => "PASS",
            Self::Failed { .. } => "FAIL",
            Self::Errored { .. } => "ERROR",
        }
    }
}

/// Immutable record of one executed check.
///
/// Appended to the runner's ordered log; never mutated after append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Declared check name; carries the numeric prefix the summary keys on.
    pub name: String,
    /// Terminal state.
    pub status: CheckStatus,
    /// Response body captured for the report, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<Value>,
    /// When the check completed.
    pub timestamp: DateTime<Utc>,
}

impl CheckResult {
    /// Records a verdict returned by a check body.
    #[must_use]
    pub fn from_verdict(name: impl Into<String>, verdict: Verdict) -> Self {
        let status = if verdict.passed {
            CheckStatus::Passed {
                detail: verdict.detail,
            }
        } else {
            CheckStatus::Failed {
                detail: verdict.detail,
            }
        };
        Self {
            name: name.into(),
            status,
            snapshot: verdict.snapshot,
            timestamp: Utc::now(),
        }
    }

    /// Records a fault caught by the runner's boundary.
    #[must_use]
    pub fn errored(name: impl Into<String>, fault: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Errored {
                fault: fault.into(),
            },
            snapshot: None,
            timestamp: Utc::now(),
        }
    }

    /// Returns true if the check passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.status.is_passed()
    }
}
