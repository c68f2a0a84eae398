//! Generic operations on a resource collection.

use std::marker::PhantomData;
use std::sync::Arc;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::addressing::{Namespace, ResourceName};
use crate::atom::AtomFeed;
use crate::context::{Args, Context};
use crate::endpoints::{Endpoint, EntityEndpoint, ResourceKind, expect_status};
use crate::entity::{Entity, EntityCollection, EntryName};
use crate::error::{ClientError, Result};

/// A collection such as `apps/local` whose entries have content `T`.
#[derive(Debug)]
pub struct CollectionEndpoint<T> {
    endpoint: Endpoint,
    entry_name: EntryName,
    content: PhantomData<fn() -> T>,
}

impl<T> Clone for CollectionEndpoint<T> {
    fn clone(&self) -> Self {
        Self {
            endpoint: self.endpoint.clone(),
            entry_name: self.entry_name,
            content: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> CollectionEndpoint<T> {
    pub fn new(context: Arc<Context>, namespace: Namespace, kind: ResourceKind<T>) -> Self {
        Self::at(context, namespace, kind.path(), kind.entry_name())
    }

    pub(crate) fn at(
        context: Arc<Context>,
        namespace: Namespace,
        name: ResourceName,
        entry_name: EntryName,
    ) -> Self {
        Self {
            endpoint: Endpoint::new(context, namespace, name),
            entry_name,
            content: PhantomData,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn address(&self) -> Result<Url> {
        self.endpoint.address()
    }

    /// Every entity in one call (`count=0`).
    pub async fn get_all(&self, cancel: &CancellationToken) -> Result<EntityCollection<T>> {
        self.get_slice(0, 0, &[], cancel).await
    }

    /// One page of at most `count` entities starting at `offset`.
    ///
    /// A `count` of zero asks the server for everything. `args` are extra
    /// query arguments such as `search` or `sort_key`.
    pub async fn get_slice(
        &self,
        offset: usize,
        count: usize,
        args: &Args,
        cancel: &CancellationToken,
    ) -> Result<EntityCollection<T>> {
        let mut query = vec![
            ("offset".to_string(), offset.to_string()),
            ("count".to_string(), count.to_string()),
        ];
        query.extend_from_slice(args);

        let feed = self
            .endpoint
            .get(&[], &query, cancel)
            .await?
            .ensure_status(StatusCode::OK)
            .await?
            .feed()
            .await?;
        debug!(
            address = %self.endpoint.name(),
            offset,
            entries = feed.entries.len(),
            total = feed.pagination.total_results,
            "Read collection slice"
        );
        self.collection_from_feed(feed)
    }

    /// Create the entity `name` with extra `args`; the server answers 201.
    pub async fn create(
        &self,
        name: &str,
        args: &Args,
        cancel: &CancellationToken,
    ) -> Result<Entity<T>> {
        if name.is_empty() {
            return Err(ClientError::InvalidArgument(
                "entity name must not be empty".to_string(),
            ));
        }
        let mut form = vec![("name".to_string(), name.to_string())];
        form.extend_from_slice(args);
        self.create_with(&form, Some(name), cancel).await
    }

    /// POST `form` to the collection, expect 201, and materialize the new
    /// entity. Without `name` the response's single entry names itself.
    pub(crate) async fn create_with(
        &self,
        form: &Args,
        name: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Entity<T>> {
        let feed = self
            .endpoint
            .post(&[], form, cancel)
            .await?
            .ensure_status(StatusCode::CREATED)
            .await?
            .feed()
            .await?;
        self.entity_from_feed(feed, name)
    }

    /// Ask the server to re-read the collection's configuration (`_reload`).
    pub async fn reload(&self, cancel: &CancellationToken) -> Result<()> {
        let response = self.endpoint.get(&["_reload"], &[], cancel).await?;
        expect_status(response, StatusCode::OK).await
    }

    /// Endpoint of one member of the collection.
    pub fn entity(&self, name: &str) -> EntityEndpoint<T> {
        EntityEndpoint::new(
            Arc::clone(self.endpoint.context()),
            self.endpoint.namespace().clone(),
            self.endpoint.name().join([name]),
        )
    }

    pub(crate) fn collection_from_feed(&self, feed: AtomFeed) -> Result<EntityCollection<T>> {
        EntityCollection::from_feed_named(
            Arc::clone(self.endpoint.context()),
            self.endpoint.namespace().clone(),
            self.endpoint.name().clone(),
            feed,
            self.entry_name,
        )
    }

    fn entity_from_feed(&self, feed: AtomFeed, name: Option<&str>) -> Result<Entity<T>> {
        let title = match name {
            Some(name) => name.to_string(),
            None => match feed.entries.as_slice() {
                [entry] => entry.title.clone(),
                entries => {
                    return Err(ClientError::MalformedResponse(format!(
                        "expected one created entry, found {}",
                        entries.len()
                    )));
                }
            },
        };
        Entity::from_feed(
            Arc::clone(self.endpoint.context()),
            self.endpoint.namespace().clone(),
            self.endpoint.name().join([title]),
            feed,
        )
    }
}
