//! Declarative expectations evaluated against request outcomes.
//!
//! Each check declares what it expects from a response; the evaluator turns
//! the declaration plus an outcome into a verdict and an explanatory string.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::outcome::RequestOutcome;

/// Expected status code value or set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusRule {
    /// Exact status code.
    Exact(u16),
    /// One of multiple acceptable status codes.
    OneOf(Vec<u16>),
}

impl StatusRule {
    /// Check if a status code matches this rule.
    #[must_use]
    pub fn matches(&self, status: u16) -> bool {
        match self {
            Self::Exact(expected) => status == *expected,
            Self::OneOf(codes) => codes.contains(&status),
        }
    }

    /// Get a description of the rule.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Exact(code) => format!("= {code}"),
            Self::OneOf(codes) => {
                let codes_str: Vec<_> = codes.iter().map(ToString::to_string).collect();
                format!("in [{}]", codes_str.join(", "))
            }
        }
    }
}

/// A single assertion to run against a request outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expectation {
    /// Response status must match the rule.
    Status {
        /// Expected status code or set.
        expected: StatusRule,
    },
    /// Every named key must be present in the top-level response mapping.
    RequiredFields {
        /// Keys that must exist.
        fields: Vec<String>,
    },
    /// A top-level field must compare equal to the expected value.
    FieldEquals {
        /// Field name.
        field: String,
        /// Expected value.
        expected: Value,
    },
    /// The response's error message must contain the needle, case-insensitive.
    DetailContains {
        /// Substring to look for.
        needle: String,
    },
}

impl Expectation {
    /// Convenience constructor for an exact-status expectation.
    #[must_use]
    pub const fn status(code: u16) -> Self {
        Self::Status {
            expected: StatusRule::Exact(code),
        }
    }

    /// Convenience constructor for a required-fields expectation.
    #[must_use]
    pub fn required_fields(fields: &[&str]) -> Self {
        Self::RequiredFields {
            fields: fields.iter().map(ToString::to_string).collect(),
        }
    }

    /// Convenience constructor for a field-equality expectation.
    #[must_use]
    pub fn field_equals(field: impl Into<String>, expected: Value) -> Self {
        Self::FieldEquals {
            field: field.into(),
            expected,
        }
    }

    /// Convenience constructor for an error-message substring expectation.
    #[must_use]
    pub fn detail_contains(needle: impl Into<String>) -> Self {
        Self::DetailContains {
            needle: needle.into(),
        }
    }

    /// Evaluates this expectation against an outcome.
    #[must_use]
    pub fn check(&self, outcome: &RequestOutcome) -> Evaluation {
        match self {
            Self::Status { expected } => check_status(outcome, expected),
            Self::RequiredFields { fields } => check_required_fields(outcome, fields),
            Self::FieldEquals { field, expected } => check_field_equals(outcome, field, expected),
            Self::DetailContains { needle } => check_detail_contains(outcome, needle),
        }
    }
}

/// Verdict of one evaluation, with a human-readable explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Whether the expectation held.
    pub passed: bool,
    /// Explanation of what was observed.
    pub detail: String,
}

impl Evaluation {
    /// Creates a passing evaluation.
    #[must_use]
    pub fn pass(detail: impl Into<String>) -> Self {
        Self {
            passed: true,
            detail: detail.into(),
        }
    }

    /// Creates a failing evaluation.
    #[must_use]
    pub fn fail(detail: impl Into<String>) -> Self {
        Self {
            passed: false,
            detail: detail.into(),
        }
    }
}

/// Evaluates expectations in order; the first mismatch short-circuits.
#[must_use]
pub fn evaluate_all(outcome: &RequestOutcome, expectations: &[Expectation]) -> Evaluation {
    for expectation in expectations {
        let evaluation = expectation.check(outcome);
        if !evaluation.passed {
            return evaluation;
        }
    }
    Evaluation::pass(format!("{} expectations satisfied", expectations.len()))
}

fn check_status(outcome: &RequestOutcome, expected: &StatusRule) -> Evaluation {
    if expected.matches(outcome.status) {
        Evaluation::pass(format!("status {}", outcome.status))
    } else if outcome.is_transport_failure() {
        let fault = outcome
            .body
            .error_message()
            .unwrap_or_else(|| "no response".to_string());
        Evaluation::fail(format!(
            "expected status {}, got no response ({fault})",
            expected.description()
        ))
    } else {
        Evaluation::fail(format!(
            "expected status {}, got {}",
            expected.description(),
            outcome.status
        ))
    }
}

fn check_required_fields(outcome: &RequestOutcome, fields: &[String]) -> Evaluation {
    let Some(Value::Object(map)) = outcome.body.as_json() else {
        return Evaluation::fail("response body is not a JSON object");
    };
    let missing: Vec<&str> = fields
        .iter()
        .filter(|f| !map.contains_key(f.as_str()))
        .map(String::as_str)
        .collect();
    if missing.is_empty() {
        Evaluation::pass(format!("all {} required fields present", fields.len()))
    } else {
        Evaluation::fail(format!("missing required fields: {}", missing.join(", ")))
    }
}

fn check_field_equals(outcome: &RequestOutcome, field: &str, expected: &Value) -> Evaluation {
    match outcome.field(field) {
        Some(actual) if actual == expected => {
            Evaluation::pass(format!("field '{field}' = {expected}"))
        }
        Some(actual) => Evaluation::fail(format!(
            "field '{field}': expected {expected}, got {actual}"
        )),
        None => Evaluation::fail(format!("field '{field}' missing from response")),
    }
}

fn check_detail_contains(outcome: &RequestOutcome, needle: &str) -> Evaluation {
    match outcome.body.error_message() {
        Some(message) if message.to_lowercase().contains(&needle.to_lowercase()) => {
            Evaluation::pass(format!("error message mentions '{needle}'"))
        }
        Some(message) => Evaluation::fail(format!(
            "error message does not mention '{needle}': {message}"
        )),
        None => Evaluation::fail(format!(
            "no error message in response to match '{needle}' against"
        )),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::outcome::BodyValue;

    use super::*;

    fn json_outcome(status: u16, body: &str) -> RequestOutcome {
        RequestOutcome::new(status, BodyValue::from_text(body))
    }

    #[test]
    fn test_status_rule_exact() {
        let rule = StatusRule::Exact(200);
        assert!(rule.matches(200));
        assert!(!rule.matches(201));
        assert_eq!(rule.description(), "= 200");
    }

    #[test]
    fn test_status_rule_one_of() {
        let rule = StatusRule::OneOf(vec![401, 500]);
        assert!(rule.matches(401));
        assert!(rule.matches(500));
        assert!(!rule.matches(200));
        assert_eq!(rule.description(), "in [401, 500]");
    }

    #[test]
    fn test_status_expectation_mismatch_message() {
        let outcome = json_outcome(401, r#"{"error": "Not authenticated"}"#);
        let evaluation = Expectation::status(200).check(&outcome);
        assert!(!evaluation.passed);
        assert_eq!(evaluation.detail, "expected status = 200, got 401");
    }

    #[test]
    fn test_status_expectation_transport_failure_message() {
        let outcome = RequestOutcome::failure("connection refused");
        let evaluation = Expectation::status(200).check(&outcome);
        assert!(!evaluation.passed);
        assert!(evaluation.detail.contains("no response"));
        assert!(evaluation.detail.contains("connection refused"));
    }

    #[test]
    fn test_required_fields_names_missing_keys() {
        let outcome = json_outcome(200, r#"{"success": true}"#);
        let evaluation =
            Expectation::required_fields(&["success", "environment", "warnings"]).check(&outcome);
        assert!(!evaluation.passed);
        assert_eq!(
            evaluation.detail,
            "missing required fields: environment, warnings"
        );
    }

    #[test]
    fn test_required_fields_rejects_non_json() {
        let outcome = RequestOutcome::new(200, BodyValue::Raw("plain text".to_string()));
        let evaluation = Expectation::required_fields(&["ok"]).check(&outcome);
        assert!(!evaluation.passed);
    }

    #[test]
    fn test_field_equals_reports_expected_vs_actual() {
        let outcome = json_outcome(200, r#"{"credits": 5}"#);
        let evaluation = Expectation::field_equals("credits", json!(10)).check(&outcome);
        assert!(!evaluation.passed);
        assert_eq!(evaluation.detail, "field 'credits': expected 10, got 5");
    }

    #[test]
    fn test_detail_contains_is_case_insensitive() {
        let outcome = json_outcome(401, r#"{"error": "Not Authenticated"}"#);
        let evaluation = Expectation::detail_contains("authenticated").check(&outcome);
        assert!(evaluation.passed);
    }

    #[test]
    fn test_evaluate_all_short_circuits() {
        let outcome = json_outcome(404, r#"{"error": "missing"}"#);
        let expectations = vec![
            Expectation::status(200),
            Expectation::required_fields(&["success"]),
        ];
        let evaluation = evaluate_all(&outcome, &expectations);
        assert!(!evaluation.passed);
        assert!(evaluation.detail.starts_with("expected status"));
    }

    #[test]
    fn test_evaluate_all_passes() {
        let outcome = json_outcome(200, r#"{"success": true, "warnings": []}"#);
        let expectations = vec![
            Expectation::status(200),
            Expectation::required_fields(&["success", "warnings"]),
            Expectation::field_equals("success", json!(true)),
        ];
        let evaluation = evaluate_all(&outcome, &expectations);
        assert!(evaluation.passed);
    }
}
