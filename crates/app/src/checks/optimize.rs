//! Optimizer checks: the credit-gated optimize endpoint and its history.

use serde_json::{Value, json};
use vigil_application::{ApplicationResult, CheckContext};
use vigil_domain::{
    ApiCall, Expectation, ResponseClass, Verdict, classify, evaluate_all,
};

use super::verdict_with_snapshot;

/// Sample listing posted to the optimizer.
fn sample_listing() -> Value {
    json!({
        "platform": "etsy",
        "title": "Handmade Leather Wallet",
        "description": "Beautiful genuine leather wallet handcrafted with care",
        "tags": ["leather", "wallet", "handmade"],
        "tone": "persuasive",
    })
}

/// `12. Optimize Auth Gate`: without a session the optimizer answers 401, or
/// 402 once a session exists but credits are spent. A 200 is only accepted
/// with the full success shape.
pub async fn optimize_auth_gate(ctx: &CheckContext) -> ApplicationResult<Verdict> {
    let outcome = ctx
        .send(ApiCall::post("/api/optimize", sample_listing()))
        .await;

    match outcome.status {
        402 => Ok(Verdict::pass("credit gate held (402 Payment Required)")),
        200 => {
            let evaluation = evaluate_all(
                &outcome,
                &[
                    Expectation::field_equals("ok", json!(true)),
                    Expectation::required_fields(&[
                        "ok",
                        "optimizationId",
                        "creditsRemaining",
                        "variant_count",
                        "variants",
                        "healthScore",
                    ]),
                    Expectation::field_equals("variant_count", json!(3)),
                ],
            );
            if !evaluation.passed {
                return Ok(verdict_with_snapshot(evaluation, &outcome));
            }
            let health_score = outcome
                .field("healthScore")
                .and_then(Value::as_i64)
                .unwrap_or(0);
            Ok(Verdict::pass(format!(
                "optimizer open: 3 variants, health score {health_score}"
            )))
        }
        _ => {
            let message = outcome.body.error_message().unwrap_or_default();
            if classify(&outcome) == ResponseClass::AuthRequired {
                Ok(Verdict::pass(format!(
                    "gated as expected (status {})",
                    outcome.status
                )))
            } else {
                Ok(Verdict::fail(format!(
                    "unexpected status {}: {message}",
                    outcome.status
                ))
                .with_snapshot(outcome.snapshot().unwrap_or(Value::Null)))
            }
        }
    }
}

/// `13. Optimization History Gating`: the history listing is gated, and an
/// open listing carries the documented pagination shape.
pub async fn optimization_history_gating(ctx: &CheckContext) -> ApplicationResult<Verdict> {
    let outcome = ctx.send(ApiCall::get("/api/optimizations?limit=5")).await;

    if outcome.status == 200 {
        let evaluation =
            Expectation::required_fields(&["ok", "optimizations", "pagination"]).check(&outcome);
        if !evaluation.passed {
            return Ok(verdict_with_snapshot(evaluation, &outcome));
        }
        let records = outcome
            .field("optimizations")
            .and_then(Value::as_array)
            .map_or(0, Vec::len);
        return Ok(Verdict::pass(format!(
            "history open: {records} records returned"
        )));
    }

    let message = outcome.body.error_message().unwrap_or_default();
    if classify(&outcome) == ResponseClass::AuthRequired {
        Ok(Verdict::pass(format!(
            "gated as expected (status {})",
            outcome.status
        )))
    } else {
        Ok(Verdict::fail(format!(
            "unexpected status {}: {message}",
            outcome.status
        ))
        .with_snapshot(outcome.snapshot().unwrap_or(Value::Null)))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use vigil_application::ports::{Transport, TransportError};
    use vigil_domain::{BodyValue, HarnessConfig, RequestOutcome};

    use super::*;

    struct StaticTransport {
        status: u16,
        body: String,
    }

    #[async_trait]
    impl Transport for StaticTransport {
        async fn request(&self, _call: &ApiCall) -> Result<RequestOutcome, TransportError> {
            Ok(RequestOutcome::new(
                self.status,
                BodyValue::from_text(&self.body),
            ))
        }
    }

    fn ctx(status: u16, body: impl Into<String>) -> CheckContext {
        CheckContext::new(
            Arc::new(StaticTransport {
                status,
                body: body.into(),
            }),
            HarnessConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_optimize_passes_on_401_gate() {
        let ctx = ctx(
            401,
            r#"{"ok": false, "error": {"code": "unauthorized", "message": "Authentication required"}}"#,
        );
        let verdict = optimize_auth_gate(&ctx).await.expect("check should not fault");
        assert!(verdict.passed);
        assert_eq!(verdict.detail, "gated as expected (status 401)");
    }

    #[tokio::test]
    async fn test_optimize_passes_on_402_credit_gate() {
        let ctx = ctx(
            402,
            r#"{"ok": false, "error": {"code": "insufficient_credits", "message": "No credits remaining"}}"#,
        );
        let verdict = optimize_auth_gate(&ctx).await.expect("check should not fault");
        assert!(verdict.passed);
    }

    #[tokio::test]
    async fn test_optimize_validates_open_success_shape() {
        let ctx = ctx(
            200,
            r#"{"ok": true, "optimizationId": "o1", "creditsRemaining": 4,
                "variant_count": 3, "variants": [{}, {}, {}], "healthScore": 82}"#,
        );
        let verdict = optimize_auth_gate(&ctx).await.expect("check should not fault");
        assert!(verdict.passed);
        assert_eq!(verdict.detail, "optimizer open: 3 variants, health score 82");
    }

    #[tokio::test]
    async fn test_optimize_fails_on_wrong_variant_count() {
        let ctx = ctx(
            200,
            r#"{"ok": true, "optimizationId": "o1", "creditsRemaining": 4,
                "variant_count": 2, "variants": [{}, {}], "healthScore": 82}"#,
        );
        let verdict = optimize_auth_gate(&ctx).await.expect("check should not fault");
        assert!(!verdict.passed);
        assert!(verdict.detail.contains("variant_count"));
    }

    #[tokio::test]
    async fn test_optimize_fails_on_server_error() {
        let ctx = ctx(
            500,
            r#"{"ok": false, "error": {"code": "missing_api_key", "message": "OpenAI API key not configured"}}"#,
        );
        let verdict = optimize_auth_gate(&ctx).await.expect("check should not fault");
        assert!(!verdict.passed);
        assert!(verdict.detail.contains("500"));
    }

    #[tokio::test]
    async fn test_history_passes_on_401_gate() {
        let ctx = ctx(
            401,
            r#"{"ok": false, "error": {"code": "unauthorized", "message": "Authentication required"}}"#,
        );
        let verdict = optimization_history_gating(&ctx)
            .await
            .expect("check should not fault");
        assert!(verdict.passed);
    }

    #[tokio::test]
    async fn test_history_counts_open_records() {
        let ctx = ctx(
            200,
            r#"{"ok": true, "optimizations": [{}, {}], "pagination": {"hasMore": false}}"#,
        );
        let verdict = optimization_history_gating(&ctx)
            .await
            .expect("check should not fault");
        assert!(verdict.passed);
        assert_eq!(verdict.detail, "history open: 2 records returned");
    }
}
