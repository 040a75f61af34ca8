//! Credit-system checks: the debug grant endpoint and the gated balance read.

use serde_json::{Value, json};
use vigil_application::{ApplicationResult, CheckContext};
use vigil_domain::{
    ApiCall, Expectation, ResponseClass, Verdict, classify, evaluate_all,
};

use super::verdict_with_snapshot;

/// `3. Debug Endpoint Enabled`: the grant endpoint is deployed and armed.
pub async fn debug_endpoint_enabled(ctx: &CheckContext) -> ApplicationResult<Verdict> {
    let outcome = ctx.send(ApiCall::get("/api/debug/grant-credits")).await;

    let evaluation = evaluate_all(
        &outcome,
        &[
            Expectation::status(200),
            Expectation::field_equals("ok", json!(true)),
            Expectation::field_equals("enabled", json!(true)),
        ],
    );
    if !evaluation.passed {
        return Ok(verdict_with_snapshot(evaluation, &outcome));
    }
    Ok(Verdict::pass("debug endpoint deployed and enabled"))
}

/// `4. Grant Credits`: a keyed grant of 5 credits lands in the ledger.
pub async fn grant_credits(ctx: &CheckContext) -> ApplicationResult<Verdict> {
    let call = ApiCall::post(
        "/api/debug/grant-credits",
        json!({ "amount": 5, "key": ctx.config().debug_key.clone() }),
    );
    let outcome = ctx.send(call).await;

    let evaluation = evaluate_all(
        &outcome,
        &[
            Expectation::status(200),
            Expectation::field_equals("ok", json!(true)),
            Expectation::required_fields(&[
                "ledgerId",
                "userId",
                "newBalance",
                "previousBalance",
                "duplicate",
            ]),
            // Grant keys are time-based server-side, so a repeat grant never
            // reports duplicate = true; see DESIGN.md.
            Expectation::field_equals("duplicate", json!(false)),
        ],
    );
    if !evaluation.passed {
        return Ok(verdict_with_snapshot(evaluation, &outcome));
    }

    let new_balance = outcome
        .field("newBalance")
        .and_then(Value::as_i64)
        .unwrap_or(-1);
    if new_balance < 5 {
        return Ok(Verdict::fail(format!(
            "expected newBalance >= 5, got {new_balance}"
        ))
        .with_snapshot(outcome.snapshot().unwrap_or(Value::Null)));
    }
    Ok(Verdict::pass(format!(
        "granted 5 credits, balance now {new_balance}"
    )))
}

/// `5. Ledger Arithmetic`: a follow-up grant of 1 advances the balance by
/// exactly 1 and lands on the configured test account.
pub async fn ledger_arithmetic(ctx: &CheckContext) -> ApplicationResult<Verdict> {
    let call = ApiCall::post(
        "/api/debug/grant-credits",
        json!({ "amount": 1, "key": ctx.config().debug_key.clone() }),
    );
    let outcome = ctx.send(call).await;

    let evaluation = evaluate_all(
        &outcome,
        &[
            Expectation::status(200),
            Expectation::field_equals("ok", json!(true)),
            Expectation::required_fields(&["newBalance", "previousBalance"]),
        ],
    );
    if !evaluation.passed {
        return Ok(verdict_with_snapshot(evaluation, &outcome));
    }

    let previous = outcome.field("previousBalance").and_then(Value::as_i64);
    let new = outcome.field("newBalance").and_then(Value::as_i64);
    match (previous, new) {
        (Some(previous), Some(new)) if new == previous + 1 => {
            if let Some(email) = outcome.field("userEmail").and_then(Value::as_str) {
                if email != ctx.config().test_user_email {
                    return Ok(Verdict::fail(format!(
                        "granted to unexpected account: {email}"
                    )));
                }
            }
            Ok(Verdict::pass(format!(
                "balance advanced {previous} -> {new} on the test account"
            )))
        }
        (Some(previous), Some(new)) => Ok(Verdict::fail(format!(
            "ledger arithmetic off: expected {} after granting 1 to {previous}, got {new}",
            previous + 1
        ))
        .with_snapshot(outcome.snapshot().unwrap_or(Value::Null))),
        _ => Ok(Verdict::fail("balance fields are not integers")),
    }
}

/// `6. Fetch Credits Gating`: the balance read is gated, and whatever sits
/// behind the gate is not a database failure.
pub async fn fetch_credits_gating(ctx: &CheckContext) -> ApplicationResult<Verdict> {
    let outcome = ctx.send(ApiCall::get("/api/user/credits")).await;

    if outcome.status == 200 {
        // No session was sent, so 200 means the gate is open. Tolerated as
        // long as the payload has the documented shape.
        let evaluation =
            Expectation::required_fields(&["balance", "stats", "recentTransactions"])
                .check(&outcome);
        if !evaluation.passed {
            return Ok(verdict_with_snapshot(evaluation, &outcome));
        }
        let balance = outcome.field("balance").and_then(Value::as_i64).unwrap_or(0);
        return Ok(Verdict::pass(format!(
            "open access: balance {balance} returned without a session"
        )));
    }

    let message = outcome.body.error_message().unwrap_or_default();
    match classify(&outcome) {
        ResponseClass::AuthRequired => Ok(Verdict::pass(format!(
            "gated as expected (status {}), no database errors",
            outcome.status
        ))),
        ResponseClass::DatabaseError => Ok(Verdict::fail(format!(
            "database-layer failure behind the gate: {message}"
        ))
        .with_snapshot(outcome.snapshot().unwrap_or(Value::Null))),
        ResponseClass::ValidationError | ResponseClass::Unknown => {
            Ok(Verdict::fail(format!(
                "unexpected status {}: {message}",
                outcome.status
            ))
            .with_snapshot(outcome.snapshot().unwrap_or(Value::Null)))
        }
    }
}
