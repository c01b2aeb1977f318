//! Backend connection configuration.

use std::time::Duration;
use url::Url;

use crate::error::{ClientError, ClientResult};

/// Default request timeout when none is configured.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the distribution backend.
///
/// The [`std::fmt::Debug`] impl redacts the bearer token to prevent
/// accidental credential exposure in log output.
#[derive(Clone)]
pub struct BackendConfig {
    base_url: String,
    bearer_token: Option<String>,
    timeout: Duration,
    tls_verify: bool,
}

impl BackendConfig {
    /// Create a configuration for the given base URL.
    ///
    /// A trailing slash is stripped so endpoint paths can be appended
    /// uniformly.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            bearer_token: None,
            timeout: DEFAULT_TIMEOUT,
            tls_verify: true,
        }
    }

    /// Attach a bearer token sent on every request.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Override the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Toggle TLS certificate verification (testing only).
    #[must_use]
    pub fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// The normalized base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The configured bearer token, if any.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }

    /// The configured request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether TLS certificates are verified.
    #[must_use]
    pub fn tls_verify(&self) -> bool {
        self.tls_verify
    }

    /// Validate that the base URL is a well-formed http(s) URL.
    pub(crate) fn validate(&self) -> ClientResult<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidConfig(format!("invalid base URL: {e}")))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ClientError::InvalidConfig(format!(
                "unsupported scheme: {other}"
            ))),
        }
    }
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("base_url", &self.base_url)
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout", &self.timeout)
            .field("tls_verify", &self.tls_verify)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let config = BackendConfig::new("https://api.example.gov/v1/");
        assert_eq!(config.base_url(), "https://api.example.gov/v1");
    }

    #[test]
    fn debug_redacts_token() {
        let config = BackendConfig::new("https://api.example.gov").with_bearer_token("secret-123");
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-123"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn rejects_non_http_schemes() {
        let config = BackendConfig::new("ftp://api.example.gov");
        assert!(matches!(
            config.validate(),
            Err(ClientError::InvalidConfig(_))
        ));
    }

    #[test]
    fn accepts_http_and_https() {
        assert!(BackendConfig::new("http://localhost:8080").validate().is_ok());
        assert!(BackendConfig::new("https://api.example.gov").validate().is_ok());
    }
}
