//! API call description handed to the transport.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP methods the harness issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET method
    #[default]
    Get,
    /// HTTP POST method
    Post,
    /// HTTP HEAD method
    Head,
}

impl HttpMethod {
    /// Returns the method as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Head => "HEAD",
        }
    }

    /// Returns whether this method carries a request body.
    #[must_use]
    pub const fn has_body(self) -> bool {
        matches!(self, Self::Post)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single call against the server under test.
///
/// Paths are relative to the configured base URL; the JSON body is only sent
/// for methods that carry one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiCall {
    /// HTTP method.
    pub method: HttpMethod,
    /// Path relative to the base URL, e.g. `/api/health`.
    pub path: String,
    /// Optional JSON request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<Value>,
}

impl ApiCall {
    /// Creates a GET call.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            json: None,
        }
    }

    /// Creates a POST call with a JSON body.
    #[must_use]
    pub fn post(path: impl Into<String>, json: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            json: Some(json),
        }
    }

    /// Creates a HEAD call.
    #[must_use]
    pub fn head(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Head,
            path: path.into(),
            json: None,
        }
    }
}

impl fmt::Display for ApiCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}
