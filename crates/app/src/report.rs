//! Console report rendering.

use std::fmt::Write;

use vigil_application::RunReport;
use vigil_domain::HarnessConfig;

const RULE: &str =
    "================================================================";

/// Renders the finished run as the console report.
#[must_use]
pub fn render(report: &RunReport, config: &HarnessConfig) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Vigil smoke run: {}", report.suite);
    let _ = writeln!(out, "Target: {}", config.base_url);
    let _ = writeln!(out, "Timeout: {}s per call", config.timeout.as_secs());
    let _ = writeln!(out, "{RULE}");

    for result in &report.results {
        let icon = if result.passed() { "✅" } else { "❌" };
        let _ = writeln!(
            out,
            "{icon} {} {}: {}",
            result.status.label(),
            result.name,
            result.status.detail()
        );
        if !result.passed() {
            if let Some(snapshot) = &result.snapshot {
                let pretty = serde_json::to_string_pretty(snapshot)
                    .unwrap_or_else(|_| snapshot.to_string());
                let _ = writeln!(out, "   response: {}", pretty.replace('\n', "\n   "));
            }
        }
    }

    let summary = &report.summary;
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "SUMMARY: {}/{} checks passed ({:.0}%)",
        summary.passed,
        summary.total,
        summary.pass_rate()
    );
    if summary.errored > 0 {
        let _ = writeln!(out, "         {} errored inside the check body", summary.errored);
    }

    let _ = writeln!(out, "CRITICAL CHECKS:");
    for critical in &summary.critical {
        let verdict = if critical.satisfied { "PASS" } else { "FAIL" };
        let _ = writeln!(out, "  {}: {verdict}", critical.label);
    }

    let _ = writeln!(out, "{RULE}");
    if summary.all_passed() {
        let _ = writeln!(out, "All smoke checks passed.");
    } else {
        let _ = writeln!(
            out,
            "{} check(s) did not pass. Review the log above.",
            summary.total - summary.passed
        );
    }

    out
}
