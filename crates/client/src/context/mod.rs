//! HTTP plumbing for one Splunk server.
//!
//! # What this module handles:
//! - Building request addresses from a [`Namespace`] and [`ResourceName`]
//! - Sending GET, POST and DELETE requests with the current auth token
//! - Racing every request against a caller-supplied cancellation token
//! - Exposing the response body as a stream ([`Response`])
//!
//! # What this module does NOT handle:
//! - Logging in or out (see [`crate::Service`])
//! - Interpreting feeds (see [`crate::atom`])
//! - Retrying failed requests; every failure goes straight to the caller
//!
//! # Invariants
//! - POST arguments travel as a form body; GET and DELETE arguments as a query string
//! - A request carries an `Authorization` header only when a token is set

mod builder;
mod response;

use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::addressing::{Namespace, ResourceName};
use crate::auth::AuthToken;
use crate::error::{ClientError, Result};

pub use builder::ContextBuilder;
pub use response::{Body, Response};

/// Request arguments as ordered key/value pairs. Keys may repeat.
pub type Args = [(String, String)];

/// Connection to one Splunk management endpoint.
///
/// A context is shared (behind an `Arc`) by a [`Service`](crate::Service)
/// and every entity and endpoint created from it. The auth token lives
/// behind an async lock so logging in through one handle is seen by all.
#[derive(Debug)]
pub struct Context {
    scheme: String,
    host: String,
    port: u16,
    base_url: Url,
    http: reqwest::Client,
    token: RwLock<Option<AuthToken>>,
}

impl Context {
    pub fn builder() -> ContextBuilder {
        ContextBuilder::new()
    }

    /// A context for `scheme://host:port` with default HTTP settings.
    pub fn new(scheme: &str, host: &str, port: u16) -> Result<Self> {
        ContextBuilder::new()
            .scheme(scheme)
            .host(host)
            .port(port)
            .build()
    }

    pub(crate) fn root_url(scheme: &str, host: &str, port: u16) -> Result<Url> {
        let host = if host.contains(':') && !host.starts_with('[') {
            format!("[{host}]")
        } else {
            host.to_string()
        };
        Url::parse(&format!("{scheme}://{host}:{port}/"))
            .map_err(|e| ClientError::InvalidUrl(format!("{scheme}://{host}:{port}: {e}")))
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// `scheme://host:port/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Current token, if any.
    pub async fn token(&self) -> Option<AuthToken> {
        self.token.read().await.clone()
    }

    pub async fn set_token(&self, token: AuthToken) {
        *self.token.write().await = Some(token);
    }

    pub async fn clear_token(&self) {
        *self.token.write().await = None;
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Full URL of `name` under `namespace`:
    /// `scheme://host:port/{namespace}/{name}`.
    ///
    /// # Errors
    ///
    /// [`ClientError::InvalidArgument`] for a `.` or `..` segment, which URL
    /// resolution would collapse into a parent path even when escaped.
    pub fn address(&self, namespace: &Namespace, name: &ResourceName) -> Result<Url> {
        if let Some(segment) = name.iter().find(|s| matches!(*s, "." | "..")) {
            return Err(ClientError::InvalidArgument(format!(
                "'{segment}' is not a valid path segment in '{name}'"
            )));
        }
        let path = if name.is_empty() {
            namespace.to_string()
        } else {
            format!("{namespace}/{name}")
        };
        self.base_url
            .join(&path)
            .map_err(|e| ClientError::InvalidUrl(format!("{path}: {e}")))
    }

    pub async fn get(
        &self,
        namespace: &Namespace,
        name: &ResourceName,
        args: &Args,
        cancel: &CancellationToken,
    ) -> Result<Response> {
        self.send(Method::GET, namespace, name, args, cancel).await
    }

    pub async fn post(
        &self,
        namespace: &Namespace,
        name: &ResourceName,
        args: &Args,
        cancel: &CancellationToken,
    ) -> Result<Response> {
        self.send(Method::POST, namespace, name, args, cancel).await
    }

    pub async fn delete(
        &self,
        namespace: &Namespace,
        name: &ResourceName,
        args: &Args,
        cancel: &CancellationToken,
    ) -> Result<Response> {
        self.send(Method::DELETE, namespace, name, args, cancel).await
    }

    async fn send(
        &self,
        method: Method,
        namespace: &Namespace,
        name: &ResourceName,
        args: &Args,
        cancel: &CancellationToken,
    ) -> Result<Response> {
        if cancel.is_cancelled() {
            return Err(ClientError::Cancelled);
        }
        let address = self.address(namespace, name)?;

        let mut builder = self.http.request(method.clone(), address.clone());
        builder = if method == Method::POST {
            builder.form(args)
        } else {
            builder.query(args)
        };
        if let Some(token) = self.token.read().await.as_ref() {
            builder = builder.header(AUTHORIZATION, token.header_value());
        }

        debug!(method = %method, address = %address, args = args.len(), "Sending request");
        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ClientError::Cancelled),
            response = builder.send() => response?,
        };
        debug!(method = %method, address = %address, status = response.status().as_u16(), "Received response");

        Ok(Response::from_reqwest(response, address, cancel.clone()))
    }
}
