//! Health-endpoint checks.

use serde_json::{Value, json};
use vigil_application::{ApplicationResult, CheckContext};
use vigil_domain::{ApiCall, Expectation, Verdict, evaluate_all};

use super::verdict_with_snapshot;

/// `1. Health Check`: GET /api/health answers 200 with the expected shape.
pub async fn health(ctx: &CheckContext) -> ApplicationResult<Verdict> {
    let outcome = ctx.send(ApiCall::get("/api/health")).await;

    let evaluation = evaluate_all(
        &outcome,
        &[
            Expectation::status(200),
            Expectation::required_fields(&["success", "environment", "warnings"]),
            Expectation::field_equals("success", json!(true)),
        ],
    );
    if !evaluation.passed {
        return Ok(verdict_with_snapshot(evaluation, &outcome));
    }

    let warnings = outcome
        .field("warnings")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    Ok(Verdict::pass(format!(
        "server healthy, {warnings} warnings reported"
    )))
}

/// `2. Health Probe (HEAD)`: the quick probe answers 200 with no body.
pub async fn health_probe(ctx: &CheckContext) -> ApplicationResult<Verdict> {
    let outcome = ctx.send(ApiCall::head("/api/health")).await;

    let evaluation = Expectation::status(200).check(&outcome);
    if !evaluation.passed {
        return Ok(verdict_with_snapshot(evaluation, &outcome));
    }
    Ok(Verdict::pass("HEAD probe answered 200"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use vigil_application::ports::{Transport, TransportError};
    use vigil_domain::{BodyValue, HarnessConfig, RequestOutcome};

    use super::*;

    /// Transport double returning the same canned response for every call.
    struct StaticTransport {
        status: u16,
        body: &'static str,
    }

    #[async_trait]
    impl Transport for StaticTransport {
        async fn request(&self, _call: &ApiCall) -> Result<RequestOutcome, TransportError> {
            Ok(RequestOutcome::new(
                self.status,
                BodyValue::from_text(self.body),
            ))
        }
    }

    fn ctx(status: u16, body: &'static str) -> CheckContext {
        CheckContext::new(
            Arc::new(StaticTransport { status, body }),
            HarnessConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_health_passes_and_counts_warnings() {
        let ctx = ctx(
            200,
            r#"{"success": true, "environment": "test", "warnings": []}"#,
        );
        let verdict = health(&ctx).await.expect("check should not fault");
        assert!(verdict.passed);
        assert_eq!(verdict.detail, "server healthy, 0 warnings reported");
    }

    #[tokio::test]
    async fn test_health_fails_on_missing_fields() {
        let ctx = ctx(200, r#"{"success": true}"#);
        let verdict = health(&ctx).await.expect("check should not fault");
        assert!(!verdict.passed);
        assert!(verdict.detail.contains("missing required fields"));
        assert!(verdict.snapshot.is_some());
    }

    #[tokio::test]
    async fn test_health_fails_on_degraded_server() {
        let ctx = ctx(500, r#"{"success": false, "error": "boom"}"#);
        let verdict = health(&ctx).await.expect("check should not fault");
        assert!(!verdict.passed);
        assert_eq!(verdict.detail, "expected status = 200, got 500");
    }

    #[tokio::test]
    async fn test_probe_passes_on_empty_200() {
        let ctx = ctx(200, "");
        let verdict = health_probe(&ctx).await.expect("check should not fault");
        assert!(verdict.passed);
    }
}
