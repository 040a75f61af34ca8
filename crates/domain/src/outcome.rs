//! Request outcome produced by a transport call.
//!
//! The outcome is a transient value: produced by the transport, consumed
//! immediately by the issuing check, never retained beyond the check body.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Decoded response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum BodyValue {
    /// Body parsed as JSON.
    Json(Value),
    /// Body that did not parse as JSON, kept verbatim.
    Raw(String),
    /// Empty body (e.g. HEAD responses).
    #[default]
    Empty,
}

impl BodyValue {
    /// Decodes a response body, preferring JSON.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            return Self::Empty;
        }
        serde_json::from_str::<Value>(text)
            .map_or_else(|_| Self::Raw(text.to_string()), Self::Json)
    }

    /// Returns the body as a JSON value, if it parsed as one.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Raw(_) | Self::Empty => None,
        }
    }

    /// Looks up a top-level field of a JSON object body.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.as_json().and_then(|v| v.get(name))
    }

    /// Extracts the server's error message, if any.
    ///
    /// Handles both shapes the server emits: a plain string under `error`,
    /// and a structured `{code, message}` object.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        let error = self.field("error")?;
        match error {
            Value::String(message) => Some(message.clone()),
            Value::Object(fields) => fields
                .get("message")
                .and_then(Value::as_str)
                .map(ToString::to_string),
            _ => None,
        }
    }
}

/// Result of one transport call, as seen by the assertion layer.
///
/// A transport-level fault never propagates past the harness boundary; it is
/// downgraded to an outcome with status `0` and the fault text as the error
/// message, which downstream expectations treat as a mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOutcome {
    /// HTTP status code; `0` when the call never produced a response.
    pub status: u16,
    /// Decoded response body.
    pub body: BodyValue,
}

impl RequestOutcome {
    /// Creates an outcome from a received response.
    #[must_use]
    pub const fn new(status: u16, body: BodyValue) -> Self {
        Self { status, body }
    }

    /// Creates the status-0 outcome representing a transport fault.
    #[must_use]
    pub fn failure(fault: impl Into<String>) -> Self {
        Self {
            status: 0,
            body: BodyValue::Json(serde_json::json!({ "error": fault.into() })),
        }
    }

    /// Returns true if the call never reached the server.
    #[must_use]
    pub const fn is_transport_failure(&self) -> bool {
        self.status == 0
    }

    /// Shortcut for a top-level body field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.body.field(name)
    }

    /// Returns the JSON body for attaching to a check result, if present.
    #[must_use]
    pub fn snapshot(&self) -> Option<Value> {
        match &self.body {
            BodyValue::Json(value) => Some(value.clone()),
            BodyValue::Raw(text) => Some(Value::String(text.clone())),
            BodyValue::Empty => None,
        }
    }
}
