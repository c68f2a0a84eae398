//! Generic operations on a single resource.

use std::marker::PhantomData;
use std::sync::Arc;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::addressing::{Namespace, ResourceName};
use crate::context::{Args, Context};
use crate::endpoints::{Endpoint, expect_status};
use crate::entity::Entity;
use crate::error::Result;

/// One resource such as `apps/local/search` whose content is `T`.
///
/// Mutations return nothing: an [`Entity`] read earlier keeps its state
/// until the caller fetches it again.
#[derive(Debug)]
pub struct EntityEndpoint<T> {
    endpoint: Endpoint,
    content: PhantomData<fn() -> T>,
}

impl<T> Clone for EntityEndpoint<T> {
    fn clone(&self) -> Self {
        Self {
            endpoint: self.endpoint.clone(),
            content: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> EntityEndpoint<T> {
    pub fn new(context: Arc<Context>, namespace: Namespace, name: ResourceName) -> Self {
        Self {
            endpoint: Endpoint::new(context, namespace, name),
            content: PhantomData,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn name(&self) -> &ResourceName {
        self.endpoint.name()
    }

    pub fn address(&self) -> Result<Url> {
        self.endpoint.address()
    }

    /// Read the resource.
    pub async fn get(&self, cancel: &CancellationToken) -> Result<Entity<T>> {
        self.get_at::<T>(&[], cancel).await
    }

    /// POST new values for the resource's attributes.
    pub async fn update(&self, args: &Args, cancel: &CancellationToken) -> Result<()> {
        self.action(&[], args, cancel).await
    }

    /// DELETE the resource.
    pub async fn remove(&self, cancel: &CancellationToken) -> Result<()> {
        let response = self.endpoint.delete(&[], &[], cancel).await?;
        expect_status(response, StatusCode::OK).await
    }

    pub async fn enable(&self, cancel: &CancellationToken) -> Result<()> {
        self.action(&["enable"], &[], cancel).await
    }

    pub async fn disable(&self, cancel: &CancellationToken) -> Result<()> {
        self.action(&["disable"], &[], cancel).await
    }

    /// POST `args` to `suffix` below the resource and expect 200.
    pub(crate) async fn action(
        &self,
        suffix: &[&str],
        args: &Args,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let response = self.endpoint.post(suffix, args, cancel).await?;
        expect_status(response, StatusCode::OK).await
    }

    /// GET `suffix` below the resource and read the entry as `U`.
    pub(crate) async fn get_at<U: DeserializeOwned>(
        &self,
        suffix: &[&str],
        cancel: &CancellationToken,
    ) -> Result<Entity<U>> {
        let feed = self
            .endpoint
            .get(suffix, &[], cancel)
            .await?
            .ensure_status(StatusCode::OK)
            .await?
            .feed()
            .await?;
        Entity::from_feed(
            Arc::clone(self.endpoint.context()),
            self.endpoint.namespace().clone(),
            self.endpoint.name().join(suffix.iter().copied()),
            feed,
        )
    }
}
