//! Checkout checks: the published package catalog and the auth gate.

use serde_json::json;
use vigil_application::{ApplicationResult, CheckContext};
use vigil_domain::{
    ApiCall, Expectation, ResponseClass, Verdict, classify, evaluate_all,
};

use super::verdict_with_snapshot;

/// Published credit packages: (key, credits, price in cents, display name).
const CATALOG: [(&str, i64, i64, &str); 3] = [
    ("launch", 10, 900, "Launch"),
    ("scale", 50, 3900, "Scale"),
    ("elite-listing", 200, 12900, "Elite Listing"),
];

/// `10. Checkout Package Catalog`: all three packages are published with the
/// expected credits, price and display name.
pub async fn package_catalog(ctx: &CheckContext) -> ApplicationResult<Verdict> {
    let outcome = ctx.send(ApiCall::get("/api/checkout")).await;

    let evaluation = evaluate_all(
        &outcome,
        &[
            Expectation::status(200),
            Expectation::required_fields(&["packages"]),
        ],
    );
    if !evaluation.passed {
        return Ok(verdict_with_snapshot(evaluation, &outcome));
    }

    let Some(packages) = outcome.field("packages") else {
        return Ok(Verdict::fail("field 'packages' missing from response"));
    };

    let missing: Vec<&str> = CATALOG
        .iter()
        .filter(|(key, ..)| packages.get(key).is_none())
        .map(|(key, ..)| *key)
        .collect();
    if !missing.is_empty() {
        return Ok(
            Verdict::fail(format!("missing packages: {}", missing.join(", ")))
                .with_snapshot(packages.clone()),
        );
    }

    for (key, credits, price, name) in CATALOG {
        let expected = [
            ("credits", json!(credits)),
            ("price", json!(price)),
            ("name", json!(name)),
        ];
        for (field, value) in expected {
            let actual = packages.get(key).and_then(|p| p.get(field));
            if actual != Some(&value) {
                return Ok(Verdict::fail(format!(
                    "package {key}.{field}: expected {value}, got {}",
                    actual.map_or_else(|| "nothing".to_string(), ToString::to_string)
                ))
                .with_snapshot(packages.clone()));
            }
        }
    }

    Ok(Verdict::pass(format!(
        "all {} packages priced as published",
        CATALOG.len()
    )))
}

/// Per-package auth-gate check (`7.` / `8.` / `9.`): posting a valid package
/// without a session must bounce off the gate, not off validation.
pub async fn checkout_auth_gate(
    ctx: &CheckContext,
    package: &'static str,
) -> ApplicationResult<Verdict> {
    let outcome = ctx
        .send(ApiCall::post("/api/checkout", json!({ "package": package })))
        .await;

    let message = outcome.body.error_message().unwrap_or_default();
    match classify(&outcome) {
        ResponseClass::AuthRequired if outcome.status == 401 => {
            let evaluation = Expectation::detail_contains("authenticated").check(&outcome);
            if evaluation.passed {
                Ok(Verdict::pass(format!(
                    "package '{package}' accepted, gate held (401)"
                )))
            } else {
                Ok(Verdict::fail(format!(
                    "401 with unexpected error for '{package}': {message}"
                )))
            }
        }
        ResponseClass::ValidationError => Ok(Verdict::fail(format!(
            "valid package '{package}' rejected by validation: {message}"
        ))
        .with_snapshot(outcome.snapshot().unwrap_or(serde_json::Value::Null))),
        _ if outcome.status == 400 => Ok(Verdict::pass(format!(
            "package '{package}' accepted (non-auth 400: {message})"
        ))),
        _ => Ok(Verdict::fail(format!(
            "unexpected status {} for package '{package}': {message}",
            outcome.status
        ))),
    }
}

/// `11. Retired Package Rejected`: a package name dropped from the catalog
/// must fail enumeration validation.
pub async fn retired_package_rejected(ctx: &CheckContext) -> ApplicationResult<Verdict> {
    let outcome = ctx
        .send(ApiCall::post("/api/checkout", json!({ "package": "starter" })))
        .await;

    let message = outcome.body.error_message().unwrap_or_default();
    if outcome.status == 400 && classify(&outcome) == ResponseClass::ValidationError {
        return Ok(Verdict::pass(format!(
            "retired name rejected by validation: {message}"
        )));
    }
    Ok(Verdict::fail(format!(
        "expected a 400 validation error for 'starter', got status {}: {message}",
        outcome.status
    ))
    .with_snapshot(outcome.snapshot().unwrap_or(serde_json::Value::Null)))
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

    fn full_catalog() -> String {
        json!({
            "packages": {
                "launch": {"credits": 10, "price": 900, "name": "Launch"},
                "scale": {"credits": 50, "price": 3900, "name": "Scale"},
                "elite-listing": {"credits": 200, "price": 12900, "name": "Elite Listing"},
            }
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_catalog_passes_when_complete() {
        let ctx = ctx(200, full_catalog());
        let verdict = package_catalog(&ctx).await.expect("check should not fault");
        assert!(verdict.passed);
        assert_eq!(verdict.detail, "all 3 packages priced as published");
    }

    #[tokio::test]
    async fn test_catalog_names_missing_packages() {
        let ctx = ctx(
            200,
            json!({"packages": {"launch": {"credits": 10, "price": 900, "name": "Launch"}}})
                .to_string(),
        );
        let verdict = package_catalog(&ctx).await.expect("check should not fault");
        assert!(!verdict.passed);
        assert_eq!(verdict.detail, "missing packages: scale, elite-listing");
    }

    #[tokio::test]
    async fn test_catalog_reports_price_drift() {
        let mut catalog: serde_json::Value =
            serde_json::from_str(&full_catalog()).expect("valid json");
        catalog["packages"]["scale"]["price"] = json!(4900);
        let ctx = ctx(200, catalog.to_string());

        let verdict = package_catalog(&ctx).await.expect("check should not fault");
        assert!(!verdict.passed);
        assert_eq!(verdict.detail, "package scale.price: expected 3900, got 4900");
    }

    #[tokio::test]
    async fn test_gate_passes_on_401_not_authenticated() {
        let ctx = ctx(401, r#"{"error": "Not authenticated"}"#);
        let verdict = checkout_auth_gate(&ctx, "launch")
            .await
            .expect("check should not fault");
        assert!(verdict.passed);
        assert!(verdict.detail.contains("gate held"));
    }

    #[tokio::test]
    async fn test_gate_fails_when_valid_package_hits_validation() {
        let ctx = ctx(400, r#"{"error": "Invalid request data (zod)"}"#);
        let verdict = checkout_auth_gate(&ctx, "launch")
            .await
            .expect("check should not fault");
        assert!(!verdict.passed);
        assert!(verdict.detail.contains("rejected by validation"));
    }

    #[tokio::test]
    async fn test_gate_fails_on_server_error() {
        let ctx = ctx(500, r#"{"error": "something broke"}"#);
        let verdict = checkout_auth_gate(&ctx, "scale")
            .await
            .expect("check should not fault");
        assert!(!verdict.passed);
    }

    #[tokio::test]
    async fn test_retired_package_passes_on_validation_error() {
        let ctx = ctx(
            400,
            r#"{"error": "Invalid request data: expected one of 'launch' | 'scale' | 'elite-listing'"}"#,
        );
        let verdict = retired_package_rejected(&ctx)
            .await
            .expect("check should not fault");
        assert!(verdict.passed);
    }

    #[tokio::test]
    async fn test_retired_package_fails_if_accepted() {
        let ctx = ctx(401, r#"{"error": "Not authenticated"}"#);
        let verdict = retired_package_rejected(&ctx)
            .await
            .expect("check should not fault");
        assert!(!verdict.passed);
        assert!(verdict.detail.contains("got status 401"));
    }
}
