//! Builder for constructing [`Context`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for connection settings
//! - Normalizing a base URL into scheme, host and port
//! - Configuring the underlying HTTP client (timeouts, TLS verification)
//!
//! # What this module does NOT handle:
//! - Logging in (handled by [`Service::log_on`](crate::Service::log_on))
//! - Sending requests (handled by [`Context`])
//!
//! # Invariants
//! - The scheme is always `http` or `https`
//! - `skip_verify` only affects HTTPS connections; HTTP connections log a warning

use std::time::Duration;

use splunk_sdk_config::Config;
use splunk_sdk_config::constants::{
    DEFAULT_HOST, DEFAULT_MAX_REDIRECTS, DEFAULT_SCHEME, DEFAULT_SPLUNK_PORT, DEFAULT_TIMEOUT_SECS,
};
use tokio::sync::RwLock;
use url::Url;

use crate::auth::AuthToken;
use crate::context::Context;
use crate::error::{ClientError, Result};

/// Builder for creating a new [`Context`].
///
/// # Example
///
/// ```rust,ignore
/// use splunk_sdk::Context;
///
/// let context = Context::builder()
///     .base_url("https://splunk.example.com:8089")
///     .timeout(Duration::from_secs(60))
///     .build()?;
/// ```
#[derive(Debug)]
pub struct ContextBuilder {
    scheme: String,
    host: String,
    port: u16,
    base_url: Option<String>,
    skip_verify: bool,
    timeout: Duration,
    token: Option<AuthToken>,
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_SPLUNK_PORT,
            base_url: None,
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            token: None,
        }
    }
}

impl ContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scheme: `http` or `https`.
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set scheme, host and port at once from a URL such as
    /// `https://localhost:8089`. Overrides the individual setters.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set whether to skip TLS certificate verification.
    ///
    /// # Security Warning
    /// Only use this in development or testing environments.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Set the request timeout. Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Start with an already known token, such as an API token.
    pub fn token(mut self, token: AuthToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Take connection settings from loaded configuration.
    ///
    /// Credentials are not applied here; see
    /// [`Service::from_config`](crate::Service::from_config).
    pub fn from_config(mut self, config: &Config) -> Self {
        self.base_url = Some(config.connection.base_url.clone());
        self.skip_verify = config.connection.skip_verify;
        self.timeout = config.connection.timeout;
        self
    }

    fn resolve_address(&self) -> Result<(String, String, u16)> {
        let Some(raw) = &self.base_url else {
            return Ok((self.scheme.clone(), self.host.clone(), self.port));
        };
        let url = Url::parse(raw.trim_end_matches('/'))
            .map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))?;
        if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
            return Err(ClientError::InvalidUrl(format!(
                "{raw}: base URL must not contain a path, query or fragment"
            )));
        }
        let host = url
            .host_str()
            .ok_or_else(|| ClientError::InvalidUrl(format!("{raw}: missing host")))?
            .trim_start_matches('[')
            .trim_end_matches(']')
            .to_string();
        let port = url
            .port()
            .or_else(|| has_explicit_port(raw).then(|| url.port_or_known_default()).flatten())
            .unwrap_or(DEFAULT_SPLUNK_PORT);
        Ok((url.scheme().to_string(), host, port))
    }

    /// Build the [`Context`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] for a scheme other than `http` or
    /// `https`, an empty host, or an unparseable base URL. A base URL may only
    /// name scheme, host and port.
    /// Returns `ClientError::HttpError` if the HTTP client fails to build.
    pub fn build(self) -> Result<Context> {
        let (scheme, host, port) = self.resolve_address()?;
        let scheme = scheme.to_ascii_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(ClientError::InvalidUrl(format!(
                "unsupported scheme '{scheme}', expected http or https"
            )));
        }
        if host.is_empty() {
            return Err(ClientError::InvalidUrl("host must not be empty".to_string()));
        }

        let mut http_builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        if self.skip_verify {
            if scheme == "https" {
                http_builder = http_builder.danger_accept_invalid_certs(true);
            } else {
                tracing::warn!(
                    "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
                );
            }
        }

        let http = http_builder.build()?;
        let base_url = Context::root_url(&scheme, &host, port)?;

        Ok(Context {
            scheme,
            host,
            port,
            base_url,
            http,
            token: RwLock::new(self.token),
        })
    }
}

/// `url` drops a port equal to the scheme default, so look at the raw text to
/// tell `https://host:443` from `https://host`.
fn has_explicit_port(raw: &str) -> bool {
    raw.split_once("://")
        .and_then(|(_, rest)| rest.split('/').next())
        .and_then(|authority| authority.rsplit('@').next())
        .and_then(|host_port| host_port.rsplit(']').next())
        .is_some_and(|tail| tail.contains(':'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[test]
    fn test_defaults() {
        let ctx = ContextBuilder::new().build().unwrap();
        assert_eq!(ctx.scheme(), "https");
        assert_eq!(ctx.host(), "localhost");
        assert_eq!(ctx.port(), 8089);
        assert_eq!(ctx.base_url().as_str(), "https://localhost:8089/");
    }

    #[test]
    fn test_base_url_overrides_parts() {
        let ctx = ContextBuilder::new()
            .host("ignored")
            .base_url("http://splunk.example.com:18089/")
            .build()
            .unwrap();
        assert_eq!(ctx.scheme(), "http");
        assert_eq!(ctx.host(), "splunk.example.com");
        assert_eq!(ctx.port(), 18089);
    }

    #[test]
    fn test_base_url_without_port_uses_management_port() {
        let ctx = ContextBuilder::new()
            .base_url("https://splunk.example.com")
            .build()
            .unwrap();
        assert_eq!(ctx.port(), 8089);
    }

    #[test]
    fn test_explicit_default_port_is_kept() {
        let ctx = ContextBuilder::new()
            .base_url("https://splunk.example.com:443")
            .build()
            .unwrap();
        assert_eq!(ctx.port(), 443);
        assert!(!has_explicit_port("https://[::1]/x"));
        assert!(has_explicit_port("https://[::1]:8089"));
    }

    #[test]
    fn test_ipv6_host() {
        let ctx = ContextBuilder::new().host("::1").build().unwrap();
        assert_eq!(ctx.base_url().as_str(), "https://[::1]:8089/");
    }

    #[test]
    fn test_rejects_bad_scheme() {
        let err = ContextBuilder::new().scheme("ftp").build().unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }

    #[test]
    fn test_rejects_unparseable_url() {
        let err = ContextBuilder::new()
            .base_url("not a url")
            .build()
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }

    #[test]
    fn test_rejects_base_url_with_path_or_query() {
        for raw in [
            "https://splunk.example.com:8089/splunk",
            "https://splunk.example.com:8089/splunk/",
            "https://splunk.example.com:8089?x",
            "https://splunk.example.com:8089/#frag",
        ] {
            let err = ContextBuilder::new().base_url(raw).build().unwrap_err();
            assert!(matches!(err, ClientError::InvalidUrl(_)), "{raw}");
        }
    }

    #[test]
    fn test_from_config_preserves_settings() {
        let mut config = Config::with_api_token(
            "https://splunk.example.com:8089".to_string(),
            SecretString::new("test-token".to_string().into()),
        );
        config.connection.skip_verify = true;
        config.connection.timeout = Duration::from_secs(120);

        let builder = ContextBuilder::new().from_config(&config);
        assert_eq!(
            builder.base_url.as_deref(),
            Some("https://splunk.example.com:8089")
        );
        assert!(builder.skip_verify);
        assert_eq!(builder.timeout, Duration::from_secs(120));
    }
}
