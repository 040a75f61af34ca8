//! Sequential suite runner.
//!
//! Runs checks in their declared order, one at a time. A check's outcome
//! never stops the run; faults are converted into `Errored` results at the
//! per-check boundary. The result log is append-only and owned here.

use std::future::Future;
use std::pin::Pin;

use vigil_domain::{CheckResult, CriticalSpec, RunSummary, Verdict};

use crate::error::ApplicationResult;

use super::context::CheckContext;

/// Future returned by a check body.
pub type CheckFuture<'a> = Pin<Box<dyn Future<Output = ApplicationResult<Verdict>> + Send + 'a>>;

/// Boxed check body invoked with the shared context.
type CheckBody = Box<dyn for<'a> Fn(&'a CheckContext) -> CheckFuture<'a> + Send + Sync>;

/// A named, ordered unit of work. Identity is the execution-order position
/// plus the name string; each check is invoked exactly once per run.
pub struct Check {
    name: String,
    body: CheckBody,
}

impl Check {
    /// Creates a check from a name and body.
    ///
    /// Bodies are usually plain `async fn`s boxed at the call site:
    ///
    /// ```ignore
    /// Check::new("1. Health Check", |ctx| Box::pin(checks::health(ctx)))
    /// ```
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: for<'a> Fn(&'a CheckContext) -> CheckFuture<'a> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            body: Box::new(body),
        }
    }

    /// Returns the declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Check").field("name", &self.name).finish()
    }
}

/// An ordered collection of checks plus the critical-check declarations
/// evaluated over the finished log.
#[derive(Debug, Default)]
pub struct Suite {
    name: String,
    checks: Vec<Check>,
    critical: Vec<CriticalSpec>,
}

impl Suite {
    /// Creates an empty suite.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            checks: Vec::new(),
            critical: Vec::new(),
        }
    }

    /// Appends a check (builder pattern). Declaration order is run order.
    #[must_use]
    pub fn with_check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    /// Declares a critical check (builder pattern).
    #[must_use]
    pub fn with_critical(mut self, spec: CriticalSpec) -> Self {
        self.critical.push(spec);
        self
    }

    /// Returns the suite name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of declared checks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Returns true if no checks are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

/// Where the runner is in the declared order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// No check has started.
    NotStarted,
    /// Check at this position is executing.
    Running(usize),
    /// Every declared check has completed.
    Completed,
}

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Name of the suite that ran.
    pub suite: String,
    /// Ordered result log; one entry per declared check.
    pub results: Vec<CheckResult>,
    /// Aggregate verdict.
    pub summary: RunSummary,
}

impl RunReport {
    /// Returns true if every check passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.summary.all_passed()
    }
}

/// Executes a suite sequentially against a context.
#[derive(Debug)]
pub struct SuiteRunner {
    state: RunState,
}

impl SuiteRunner {
    /// Creates a runner in the `NotStarted` state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: RunState::NotStarted,
        }
    }

    /// Returns the current run state.
    #[must_use]
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Runs every check in declared order and returns the report.
    ///
    /// The transition `Running(i) -> Running(i + 1)` always occurs once
    /// check `i` completes, whatever its outcome. No retry, no early abort.
    pub async fn run(&mut self, suite: &Suite, ctx: &CheckContext) -> RunReport {
        let mut results = Vec::with_capacity(suite.checks.len());

        for (position, check) in suite.checks.iter().enumerate() {
            self.state = RunState::Running(position);
            tracing::info!(check = check.name(), position, "running check");

            let result = match (check.body)(ctx).await {
                Ok(verdict) => CheckResult::from_verdict(check.name(), verdict),
                Err(fault) => {
                    tracing::warn!(check = check.name(), %fault, "check body faulted");
                    CheckResult::errored(check.name(), fault.to_string())
                }
            };
            tracing::info!(
                check = check.name(),
                outcome = result.status.label(),
                detail = result.status.detail(),
                "check completed"
            );
            results.push(result);
        }

        self.state = RunState::Completed;
        let summary = RunSummary::compute(&results, &suite.critical);
        RunReport {
            suite: suite.name.clone(),
            results,
            summary,
        }
    }
}

impl Default for SuiteRunner {
    fn default() -> Self {
        Self::new()
    }
}
