//! Harness configuration.
//!
//! Replaces the module-level constants of the original smoke script with an
//! explicit configuration value passed into the harness at construction.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

/// Default target when no base URL is supplied.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
/// Shared secret accepted by the debug credit-grant endpoint in test stacks.
pub const DEFAULT_DEBUG_KEY: &str = "debug-key-12345";
/// Account the debug endpoint creates when no user id is supplied.
pub const DEFAULT_USER_EMAIL: &str = "test@elitelistingai.com";
/// Per-call timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for a harness run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Base URL of the server under test, without a trailing slash.
    pub base_url: String,
    /// Shared secret for the debug credit-grant endpoint.
    pub debug_key: String,
    /// Email of the test account the debug endpoint operates on.
    pub test_user_email: String,
    /// Fixed per-call timeout.
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
}

impl HarnessConfig {
    /// Creates a configuration for the given target, defaults elsewhere.
    #[must_use]
    pub fn new(base_url: impl Into<String>, debug_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            debug_key: debug_key.into(),
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse as http(s), the debug
    /// key is empty, or the timeout is zero.
    pub fn validate(&self) -> DomainResult<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| DomainError::InvalidBaseUrl(format!("{e}: {}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DomainError::InvalidBaseUrl(format!(
                "unsupported scheme '{}'",
                url.scheme()
            )));
        }
        if self.debug_key.trim().is_empty() {
            return Err(DomainError::MissingDebugKey);
        }
        if self.timeout.is_zero() {
            return Err(DomainError::ZeroTimeout);
        }
        Ok(())
    }

    /// Joins an API path onto the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            debug_key: DEFAULT_DEBUG_KEY.to_string(),
            test_user_email: DEFAULT_USER_EMAIL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = HarnessConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = HarnessConfig::new("not-a-url", "key");
        assert!(matches!(
            config.validate(),
            Err(DomainError::InvalidBaseUrl(_))
        ));

        let config = HarnessConfig::new("ftp://example.com", "key");
        assert!(matches!(
            config.validate(),
            Err(DomainError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_empty_debug_key_rejected() {
        let config = HarnessConfig::new("http://localhost:3000", "  ");
        assert_eq!(config.validate(), Err(DomainError::MissingDebugKey));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = HarnessConfig {
            timeout: Duration::ZERO,
            ..HarnessConfig::default()
        };
        assert_eq!(config.validate(), Err(DomainError::ZeroTimeout));
    }

    #[test]
    fn test_endpoint_joins_slashes() {
        let config = HarnessConfig::new("http://localhost:3000/", "key");
        assert_eq!(
            config.endpoint("/api/health"),
            "http://localhost:3000/api/health"
        );
        assert_eq!(
            config.endpoint("api/health"),
            "http://localhost:3000/api/health"
        );
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = HarnessConfig::default();
        let json = serde_json::to_string(&config).expect("serialize");
        let restored: HarnessConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(config, restored);
    }
}
