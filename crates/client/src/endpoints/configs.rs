//! Configuration endpoints (`properties`, `configs/conf-{file}`).
//!
//! Files and stanzas are read through `properties`, which reports settings
//! as they are merged on disk. Stanzas are deleted through
//! `configs/conf-{file}/{stanza}`, because `properties` has no DELETE.

use std::sync::Arc;

use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;

use crate::addressing::{Namespace, ResourceName};
use crate::context::{Args, Context};
use crate::endpoints::{CollectionEndpoint, Endpoint, ResourceKind, expect_status};
use crate::entity::{EntityCollection, EntryName};
use crate::error::{ClientError, Result};
use crate::models::{ConfigurationFile, ConfigurationSetting, ConfigurationStanza};

/// Configuration files such as `props` or `transforms`.
pub const CONFIGURATIONS: ResourceKind<ConfigurationFile> = ResourceKind::new(&["properties"]);

impl CollectionEndpoint<ConfigurationFile> {
    /// Endpoint of the file `name`.
    pub fn file(&self, name: &str) -> ConfigurationFileEndpoint {
        ConfigurationFileEndpoint::new(
            Arc::clone(self.endpoint().context()),
            self.endpoint().namespace().clone(),
            name,
        )
    }
}

/// The stanzas of one configuration file.
#[derive(Debug, Clone)]
pub struct ConfigurationFileEndpoint {
    file: String,
    stanzas: CollectionEndpoint<ConfigurationStanza>,
}

impl ConfigurationFileEndpoint {
    pub fn new(context: Arc<Context>, namespace: Namespace, file: &str) -> Self {
        Self {
            file: file.to_string(),
            stanzas: CollectionEndpoint::at(
                context,
                namespace,
                ResourceName::new(["properties", file]),
                EntryName::Title,
            ),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file
    }

    /// Generic collection operations on the stanzas.
    pub fn stanzas(&self) -> &CollectionEndpoint<ConfigurationStanza> {
        &self.stanzas
    }

    /// Every stanza of the file.
    pub async fn list(
        &self,
        cancel: &CancellationToken,
    ) -> Result<EntityCollection<ConfigurationStanza>> {
        self.stanzas.get_all(cancel).await
    }

    /// Add an empty stanza `name` to the file.
    pub async fn create_stanza(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<StanzaEndpoint> {
        if name.is_empty() {
            return Err(ClientError::InvalidArgument(
                "stanza name must not be empty".to_string(),
            ));
        }
        let args = [("__stanza".to_string(), name.to_string())];
        let response = self.stanzas.endpoint().post(&[], &args, cancel).await?;
        expect_status(response, StatusCode::CREATED).await?;
        Ok(self.stanza(name))
    }

    pub fn stanza(&self, name: &str) -> StanzaEndpoint {
        let endpoint = self.stanzas.endpoint();
        StanzaEndpoint::new(
            Arc::clone(endpoint.context()),
            endpoint.namespace().clone(),
            &self.file,
            name,
        )
    }
}

/// One stanza of a configuration file.
#[derive(Debug, Clone)]
pub struct StanzaEndpoint {
    file: String,
    stanza: String,
    settings: CollectionEndpoint<ConfigurationSetting>,
}

impl StanzaEndpoint {
    pub fn new(context: Arc<Context>, namespace: Namespace, file: &str, stanza: &str) -> Self {
        Self {
            file: file.to_string(),
            stanza: stanza.to_string(),
            settings: CollectionEndpoint::at(
                context,
                namespace,
                ResourceName::new(["properties", file, stanza]),
                EntryName::Title,
            ),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file
    }

    pub fn stanza_name(&self) -> &str {
        &self.stanza
    }

    fn endpoint(&self) -> &Endpoint {
        self.settings.endpoint()
    }

    /// Every `key = value` setting of the stanza.
    pub async fn settings(
        &self,
        cancel: &CancellationToken,
    ) -> Result<EntityCollection<ConfigurationSetting>> {
        self.settings.get_all(cancel).await
    }

    /// Write several settings at once. Nothing is sent when `settings` is empty.
    pub async fn update(&self, settings: &Args, cancel: &CancellationToken) -> Result<()> {
        if settings.is_empty() {
            return Ok(());
        }
        let response = self.endpoint().post(&[], settings, cancel).await?;
        expect_status(response, StatusCode::OK).await
    }

    /// Delete the stanza from its file.
    pub async fn remove(&self, cancel: &CancellationToken) -> Result<()> {
        let conf = format!("conf-{}", self.file);
        let name = ResourceName::new(["configs", conf.as_str(), self.stanza.as_str()]);
        let endpoint = self.endpoint();
        let response = endpoint
            .context()
            .delete(endpoint.namespace(), &name, &[], cancel)
            .await?;
        expect_status(response, StatusCode::OK).await
    }

    /// The raw value of `key`. The server answers with plain text.
    pub async fn get_setting(&self, key: &str, cancel: &CancellationToken) -> Result<String> {
        self.endpoint()
            .get(&[key], &[], cancel)
            .await?
            .ensure_status(StatusCode::OK)
            .await?
            .text()
            .await
    }

    /// Set `key` to `value`.
    pub async fn update_setting(
        &self,
        key: &str,
        value: &str,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let args = [("value".to_string(), value.to_string())];
        let response = self.endpoint().post(&[key], &args, cancel).await?;
        expect_status(response, StatusCode::OK).await
    }
}
