//! Entry point tying a [`Context`] to a default [`Namespace`].
//!
//! This module is responsible for:
//! - Logging on (session key) and off
//! - Applying credentials and namespace from loaded configuration
//! - Handing out collection endpoints bound to the service's namespace
//!
//! # What this module does NOT handle:
//! - Renewing an expired session; a 401 surfaces to the caller
//! - Sending requests (handled by [`Context`])

use std::sync::Arc;

use reqwest::StatusCode;
use secrecy::ExposeSecret;
use splunk_sdk_config::{AuthStrategy, Config, NamespaceConfig};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::addressing::{Namespace, ResourceName, Scope};
use crate::auth::AuthToken;
use crate::context::{Context, ContextBuilder};
use crate::endpoints::{
    APPLICATIONS, CONFIGURATIONS, CollectionEndpoint, EntityEndpoint, JOBS, ResourceKind,
    SAVED_SEARCHES, expect_status,
};
use crate::error::{ClientError, Result};
use crate::models::{Application, ConfigurationFile, Job, SavedSearch};

/// A Splunk server as seen from one namespace.
///
/// Cloning is cheap; clones share the [`Context`] and therefore the login.
#[derive(Debug, Clone)]
pub struct Service {
    context: Arc<Context>,
    namespace: Namespace,
}

impl Service {
    /// Wrap a fresh context under the default namespace.
    pub fn new(context: Context) -> Self {
        Self::from_context(Arc::new(context))
    }

    pub fn from_context(context: Arc<Context>) -> Self {
        Self {
            context,
            namespace: Namespace::Default,
        }
    }

    /// The same server seen from `namespace`.
    pub fn with_namespace(&self, namespace: Namespace) -> Self {
        Self {
            context: Arc::clone(&self.context),
            namespace,
        }
    }

    /// Build a context from `config` and authenticate with its strategy.
    ///
    /// An API token is attached directly; username and password are
    /// exchanged for a session key through [`log_on`](Self::log_on).
    pub async fn from_config(config: &Config, cancel: &CancellationToken) -> Result<Self> {
        let context = ContextBuilder::new().from_config(config).build()?;
        let service = Self::new(context).with_namespace(namespace_from_config(&config.namespace));
        match &config.auth.strategy {
            AuthStrategy::ApiToken { token } => {
                service
                    .context
                    .set_token(AuthToken::bearer(token.expose_secret()))
                    .await;
            }
            AuthStrategy::SessionToken { username, password } => {
                service
                    .log_on(username, password.expose_secret(), cancel)
                    .await?;
            }
        }
        Ok(service)
    }

    pub fn context(&self) -> &Arc<Context> {
        &self.context
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Exchange credentials for a session key and use it from now on.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AuthFailed`] when the server rejects the
    /// credentials, or [`ClientError::MalformedResponse`] when the reply
    /// carries no `sessionKey`.
    pub async fn log_on(
        &self,
        username: &str,
        password: &str,
        cancel: &CancellationToken,
    ) -> Result<()> {
        debug!("Logging in to Splunk as {}", username);
        let args = [
            ("username".to_string(), username.to_string()),
            ("password".to_string(), password.to_string()),
        ];
        let feed = self
            .context
            .post(
                &Namespace::Default,
                &ResourceName::new(["auth", "login"]),
                &args,
                cancel,
            )
            .await?
            .ensure_status(StatusCode::OK)
            .await?
            .feed()
            .await?;
        let key = feed.response_value("sessionKey").ok_or_else(|| {
            ClientError::MalformedResponse("Missing sessionKey in response".to_string())
        })?;
        self.context.set_token(AuthToken::session(key)).await;
        info!("Logged in to Splunk as {}", username);
        Ok(())
    }

    /// Invalidate the current session key on the server and forget it locally.
    ///
    /// The local token is cleared even when the server call fails. Without
    /// a token this does nothing. An API token is only forgotten locally:
    /// deleting it on the server would revoke it for every other client.
    pub async fn log_off(&self, cancel: &CancellationToken) -> Result<()> {
        let token = match self.context.token().await {
            None => return Ok(()),
            Some(AuthToken::Bearer(_)) => {
                debug!("Forgetting API token without revoking it");
                self.context.clear_token().await;
                return Ok(());
            }
            Some(token) => token,
        };
        let name = ResourceName::new(["authentication", "httpauth-tokens", token.expose()]);
        let result = self
            .context
            .delete(&Namespace::Default, &name, &[], cancel)
            .await;
        self.context.clear_token().await;
        expect_status(result?, StatusCode::OK).await
    }

    /// Any collection of this service's namespace.
    pub fn collection<T: serde::de::DeserializeOwned>(
        &self,
        kind: ResourceKind<T>,
    ) -> CollectionEndpoint<T> {
        CollectionEndpoint::new(Arc::clone(&self.context), self.namespace.clone(), kind)
    }

    /// Any single resource of this service's namespace.
    pub fn entity<T: serde::de::DeserializeOwned>(&self, name: ResourceName) -> EntityEndpoint<T> {
        EntityEndpoint::new(Arc::clone(&self.context), self.namespace.clone(), name)
    }

    pub fn applications(&self) -> CollectionEndpoint<Application> {
        self.collection(APPLICATIONS)
    }

    pub fn configurations(&self) -> CollectionEndpoint<ConfigurationFile> {
        self.collection(CONFIGURATIONS)
    }

    pub fn saved_searches(&self) -> CollectionEndpoint<SavedSearch> {
        self.collection(SAVED_SEARCHES)
    }

    pub fn jobs(&self) -> CollectionEndpoint<Job> {
        self.collection(JOBS)
    }
}

/// `servicesNS/{owner}/{app}` when either half is configured, with the
/// missing half as the wildcard; the default namespace otherwise.
fn namespace_from_config(config: &NamespaceConfig) -> Namespace {
    let scope = |value: &Option<String>| value.as_deref().map_or(Scope::Any, Scope::from);
    match (&config.owner, &config.app) {
        (None, None) => Namespace::Default,
        (owner, app) => Namespace::Scoped {
            user: scope(owner),
            app: scope(app),
        },
    }
}
