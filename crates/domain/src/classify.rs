//! Response classification.
//!
//! Gated endpoints answer 401, or 500 with an auth-flavored message, when the
//! harness holds no session. A single classifier maps an outcome onto a
//! closed tag set so check bodies dispatch on the tag instead of re-parsing
//! free text.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::outcome::RequestOutcome;

/// Prisma error codes the backend surfaces on database-layer failures.
const DATABASE_CODES: [&str; 4] = ["P1001", "P1017", "P2002", "P2025"];

/// Schema vocabulary that marks a database-layer failure.
const SCHEMA_MARKERS: [&str; 4] = ["table", "column", "schema", "relation"];

/// Phrases that mark a missing-session failure.
const AUTH_MARKERS: [&str; 3] = ["auth", "session", "not authenticated"];

/// Phrases that mark an input-validation failure.
const VALIDATION_MARKERS: [&str; 4] = ["validation", "invalid", "zod", "enum"];

/// Failure mode of a response, as far as the harness can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseClass {
    /// The endpoint requires a session the harness does not hold.
    AuthRequired,
    /// The server rejected the request payload.
    ValidationError,
    /// The database layer failed; a defect in the system under test.
    DatabaseError,
    /// None of the recognized failure modes.
    Unknown,
}

impl ResponseClass {
    /// Returns the tag as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AuthRequired => "auth-required",
            Self::ValidationError => "validation-error",
            Self::DatabaseError => "database-error",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ResponseClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classifies a request outcome into a failure mode.
///
/// Precedence: a 401 is always `AuthRequired`; database markers outrank auth
/// markers so a Prisma failure inside an auth handler is not mistaken for
/// correct gating; validation is only recognized on 400/422 responses.
#[must_use]
pub fn classify(outcome: &RequestOutcome) -> ResponseClass {
    if outcome.status == 401 {
        return ResponseClass::AuthRequired;
    }

    let message = outcome.body.error_message().unwrap_or_default();
    let lower = message.to_lowercase();

    if DATABASE_CODES.iter().any(|code| message.contains(code))
        || SCHEMA_MARKERS.iter().any(|marker| lower.contains(marker))
    {
        return ResponseClass::DatabaseError;
    }

    if AUTH_MARKERS.iter().any(|marker| lower.contains(marker)) {
        return ResponseClass::AuthRequired;
    }

    if matches!(outcome.status, 400 | 422)
        && VALIDATION_MARKERS.iter().any(|marker| lower.contains(marker))
    {
        return ResponseClass::ValidationError;
    }

    ResponseClass::Unknown
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::outcome::BodyValue;

    use super::*;

    fn outcome(status: u16, body: &str) -> RequestOutcome {
        RequestOutcome::new(status, BodyValue::from_text(body))
    }

    #[test]
    fn test_401_is_auth_required() {
        let result = classify(&outcome(401, r#"{"error": "Not authenticated"}"#));
        assert_eq!(result, ResponseClass::AuthRequired);

        // Even with an empty body, 401 means the gate held.
        let result = classify(&outcome(401, ""));
        assert_eq!(result, ResponseClass::AuthRequired);
    }

    #[test]
    fn test_500_with_session_message_is_auth_required() {
        let result = classify(&outcome(500, r#"{"error": "Auth session missing!"}"#));
        assert_eq!(result, ResponseClass::AuthRequired);
    }

    #[test]
    fn test_prisma_code_is_database_error() {
        let result = classify(&outcome(
            500,
            r#"{"error": "P1001: Can't reach database server"}"#,
        ));
        assert_eq!(result, ResponseClass::DatabaseError);
    }

    #[test]
    fn test_schema_vocabulary_is_database_error() {
        let result = classify(&outcome(500, r#"{"error": "relation users does not exist"}"#));
        assert_eq!(result, ResponseClass::DatabaseError);
    }

    #[test]
    fn test_database_outranks_auth_marker() {
        // "P2025" appearing in an auth handler's error is still a DB failure.
        let result = classify(&outcome(
            500,
            r#"{"error": "P2025: record not found while loading session"}"#,
        ));
        assert_eq!(result, ResponseClass::DatabaseError);
    }

    #[test]
    fn test_zod_rejection_is_validation_error() {
        let result = classify(&outcome(
            400,
            r#"{"error": "Invalid request data", "details": [{"code": "invalid_enum_value"}]}"#,
        ));
        assert_eq!(result, ResponseClass::ValidationError);
    }

    #[test]
    fn test_validation_requires_client_error_status() {
        let result = classify(&outcome(500, r#"{"error": "invalid state"}"#));
        assert_eq!(result, ResponseClass::Unknown);
    }

    #[test]
    fn test_success_is_unknown() {
        let result = classify(&outcome(200, r#"{"ok": true}"#));
        assert_eq!(result, ResponseClass::Unknown);
    }

    #[test]
    fn test_classification_is_stable() {
        // Same outcome, same tag, every time.
        let o = outcome(500, r#"{"error": "Auth session missing!"}"#);
        assert_eq!(classify(&o), classify(&o));
    }
}
