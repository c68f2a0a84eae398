//! REST endpoint facades.
//!
//! # What this module handles:
//! - [`Endpoint`]: a context, namespace and resource name with an address
//! - Generic collection and entity operations over any content type
//! - Resource-specific operations for apps, configurations, saved searches and jobs
//!
//! # What this module does NOT handle:
//! - Caching results or refreshing entities after a mutation
//! - Paging through collections automatically
//!
//! # Invariants
//! - Every operation performs exactly one HTTP call
//! - Endpoints hold no state beyond their address

pub mod apps;
mod collection;
pub mod configs;
mod entity;
mod form_params;
pub mod jobs;
pub mod saved_searches;

use std::marker::PhantomData;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use url::Url;

use crate::addressing::{Namespace, ResourceName};
use crate::context::{Args, Context, Response};
use crate::entity::EntryName;
use crate::error::Result;

pub use apps::APPLICATIONS;
pub use collection::CollectionEndpoint;
pub use configs::{CONFIGURATIONS, ConfigurationFileEndpoint, StanzaEndpoint};
pub use entity::EntityEndpoint;
pub use jobs::JOBS;
pub use saved_searches::SAVED_SEARCHES;

/// A resource address bound to a context.
#[derive(Debug, Clone)]
pub struct Endpoint {
    context: Arc<Context>,
    namespace: Namespace,
    name: ResourceName,
}

impl Endpoint {
    pub fn new(context: Arc<Context>, namespace: Namespace, name: ResourceName) -> Self {
        Self {
            context,
            namespace,
            name,
        }
    }

    pub fn context(&self) -> &Arc<Context> {
        &self.context
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn name(&self) -> &ResourceName {
        &self.name
    }

    pub fn address(&self) -> Result<Url> {
        self.context.address(&self.namespace, &self.name)
    }

    /// GET this resource, or `suffix` below it.
    pub async fn get(
        &self,
        suffix: &[&str],
        args: &Args,
        cancel: &CancellationToken,
    ) -> Result<Response> {
        self.context
            .get(&self.namespace, &self.name.join(suffix.iter().copied()), args, cancel)
            .await
    }

    /// POST to this resource, or to `suffix` below it.
    pub async fn post(
        &self,
        suffix: &[&str],
        args: &Args,
        cancel: &CancellationToken,
    ) -> Result<Response> {
        self.context
            .post(&self.namespace, &self.name.join(suffix.iter().copied()), args, cancel)
            .await
    }

    /// DELETE this resource, or `suffix` below it.
    pub async fn delete(
        &self,
        suffix: &[&str],
        args: &Args,
        cancel: &CancellationToken,
    ) -> Result<Response> {
        self.context
            .delete(&self.namespace, &self.name.join(suffix.iter().copied()), args, cancel)
            .await
    }
}

/// Path of a resource collection and the content type of its entries.
///
/// ```
/// use splunk_sdk::endpoints::{APPLICATIONS, JOBS};
///
/// assert_eq!(APPLICATIONS.path().to_string(), "apps/local");
/// assert_eq!(JOBS.path().to_string(), "search/jobs");
/// ```
pub struct ResourceKind<T> {
    path: &'static [&'static str],
    entry_name: EntryName,
    content: PhantomData<fn() -> T>,
}

impl<T> ResourceKind<T> {
    pub const fn new(path: &'static [&'static str]) -> Self {
        Self {
            path,
            entry_name: EntryName::Title,
            content: PhantomData,
        }
    }

    /// Name entities by `entry_name` instead of the entry title.
    pub const fn named_by(self, entry_name: EntryName) -> Self {
        Self {
            path: self.path,
            entry_name,
            content: PhantomData,
        }
    }

    pub fn path(&self) -> ResourceName {
        ResourceName::new(self.path.iter().copied())
    }

    pub fn entry_name(&self) -> EntryName {
        self.entry_name
    }
}

impl<T> Clone for ResourceKind<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ResourceKind<T> {}

impl<T> std::fmt::Debug for ResourceKind<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceKind")
            .field("path", &self.path)
            .field("entry_name", &self.entry_name)
            .finish()
    }
}

/// Ensure a response has `expected` status and discard its body.
pub(crate) async fn expect_status(response: Response, expected: reqwest::StatusCode) -> Result<()> {
    response.ensure_status(expected).await.map(drop)
}
