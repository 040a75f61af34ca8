//! HTTP transport implementation using reqwest.
//!
//! This adapter implements the `Transport` port using the reqwest library.
//! It handles all HTTP communication with the server under test.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use vigil_application::ports::{Transport, TransportError};
use vigil_domain::{ApiCall, BodyValue, HarnessConfig, HttpMethod, RequestOutcome};

/// Transport adapter over `reqwest::Client`.
///
/// Default configuration:
/// - per-call timeout from the harness configuration (30 s by default)
/// - follow redirects: up to 10
/// - TLS verification: enabled (rustls)
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Creates a transport for the configured target.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be created.
    pub fn new(config: &HarnessConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("Vigil/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            timeout: config.timeout,
        })
    }

    /// Creates a transport with a custom reqwest client.
    #[must_use]
    pub fn with_client(client: Client, config: &HarnessConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            timeout: config.timeout,
        }
    }

    /// Converts the domain `HttpMethod` to a reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Head => Method::HEAD,
        }
    }

    /// Joins a call path onto the base URL.
    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Maps reqwest errors onto the port's `TransportError` taxonomy.
    fn map_error(error: &reqwest::Error, timeout: Duration) -> TransportError {
        let host = error
            .url()
            .and_then(Url::host_str)
            .unwrap_or("unknown")
            .to_string();

        if error.is_timeout() {
            return TransportError::Timeout {
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            };
        }

        if error.is_connect() {
            let message = error.to_string();
            let lower = message.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") {
                return TransportError::Dns { host, message };
            }
            if lower.contains("refused") {
                return TransportError::ConnectionRefused { host };
            }
            return TransportError::ConnectionFailed(message);
        }

        if error.is_builder() {
            return TransportError::InvalidUrl(error.to_string());
        }

        TransportError::Other(error.to_string())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn request(&self, call: &ApiCall) -> Result<RequestOutcome, TransportError> {
        let url = self.endpoint(&call.path);
        let parsed_url =
            Url::parse(&url).map_err(|e| TransportError::InvalidUrl(format!("{e}: {url}")))?;

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(call.method), parsed_url)
            .timeout(self.timeout);

        if let Some(json) = &call.json {
            builder = builder.json(json);
        }

        tracing::debug!(%call, %url, "issuing request");
        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, self.timeout))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;

        Ok(RequestOutcome::new(status, BodyValue::from_text(&text)))
    }
}
