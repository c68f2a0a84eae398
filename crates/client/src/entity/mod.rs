//! Typed entities materialized from Atom entries.
//!
//! # What this module handles:
//! - Turning one [`AtomEntry`] into an [`Entity<T>`] with typed content
//! - Picking the right entry out of a single-resource feed
//! - Collections of entities with their paging window ([`EntityCollection`])
//!
//! # What this module does NOT handle:
//! - Issuing mutations (see [`crate::endpoints`])
//! - Walking pages; callers request successive slices themselves
//!
//! # Invariants
//! - `initialize` replaces the whole state, and only when the new feed parses
//! - A mutating call never changes an entity already held by the caller

mod collection;

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::addressing::{Namespace, ResourceName};
use crate::atom::{AtomEntry, AtomFeed, Value};
use crate::context::Context;
use crate::endpoints::EntityEndpoint;
use crate::error::{ClientError, Result};
use crate::models::Acl;

pub use collection::{EntityCollection, EntryName};

/// Metadata of the entry an entity was built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryMetadata {
    pub id: Option<String>,
    pub title: String,
    pub author: Option<String>,
    pub updated: Option<DateTime<FixedOffset>>,
    pub published: Option<DateTime<FixedOffset>>,
    pub links: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
struct EntityState<T> {
    namespace: Namespace,
    metadata: EntryMetadata,
    acl: Option<Acl>,
    fields: Value,
    content: T,
}

/// One REST resource with typed content `T`.
///
/// The entity keeps a shared handle to the [`Context`] it was read through
/// so it can refresh itself or hand out an [`EntityEndpoint`] for mutations.
#[derive(Debug, Clone)]
pub struct Entity<T> {
    context: Arc<Context>,
    name: ResourceName,
    state: EntityState<T>,
}

impl<T: DeserializeOwned> Entity<T> {
    /// Materialize `entry` as the resource `name` read under `namespace`.
    ///
    /// # Errors
    ///
    /// [`ClientError::MalformedResponse`] when the content or the ACL does
    /// not deserialize.
    pub fn from_entry(
        context: Arc<Context>,
        namespace: Namespace,
        name: ResourceName,
        entry: AtomEntry,
    ) -> Result<Self> {
        let state = EntityState::from_entry(&namespace, entry)?;
        Ok(Self {
            context,
            name,
            state,
        })
    }

    /// Materialize the entry of `feed` that describes `name`.
    ///
    /// The entry whose title is `name.title()` wins; failing that, a feed
    /// with exactly one entry is taken as describing `name`.
    pub fn from_feed(
        context: Arc<Context>,
        namespace: Namespace,
        name: ResourceName,
        feed: AtomFeed,
    ) -> Result<Self> {
        let entry = select_entry(&name, feed)?;
        Self::from_entry(context, namespace, name, entry)
    }

    /// Replace this entity's state with the matching entry of `feed`.
    ///
    /// On error the previous state is kept.
    pub fn initialize(&mut self, context: Arc<Context>, feed: AtomFeed) -> Result<()> {
        let entry = select_entry(&self.name, feed)?;
        let state = EntityState::from_entry(&self.state.namespace, entry)?;
        self.context = context;
        self.state = state;
        Ok(())
    }

    /// Re-read this entity from the server.
    pub async fn refresh(&mut self, cancel: &CancellationToken) -> Result<()> {
        let feed = self
            .context
            .get(&self.state.namespace, &self.name, &[], cancel)
            .await?
            .ensure_status(StatusCode::OK)
            .await?
            .feed()
            .await?;
        let context = Arc::clone(&self.context);
        self.initialize(context, feed)
    }

    /// Endpoint for mutating this entity.
    pub fn endpoint(&self) -> EntityEndpoint<T> {
        EntityEndpoint::new(
            Arc::clone(&self.context),
            self.state.namespace.clone(),
            self.name.clone(),
        )
    }
}

impl<T> Entity<T> {
    pub fn context(&self) -> &Arc<Context> {
        &self.context
    }

    /// Namespace the entity lives in. For reads through a wildcard namespace
    /// this is the concrete owner and app from the entry's ACL.
    pub fn namespace(&self) -> &Namespace {
        &self.state.namespace
    }

    pub fn name(&self) -> &ResourceName {
        &self.name
    }

    /// Entry title; for most resources the resource's own name.
    pub fn title(&self) -> &str {
        &self.state.metadata.title
    }

    pub fn address(&self) -> Result<Url> {
        self.context.address(&self.state.namespace, &self.name)
    }

    pub fn metadata(&self) -> &EntryMetadata {
        &self.state.metadata
    }

    pub fn link(&self, rel: &str) -> Option<&str> {
        self.state.metadata.links.get(rel).map(String::as_str)
    }

    pub fn acl(&self) -> Option<&Acl> {
        self.state.acl.as_ref()
    }

    /// Typed content.
    pub fn content(&self) -> &T {
        &self.state.content
    }

    pub fn into_content(self) -> T {
        self.state.content
    }

    /// Raw content as parsed from the feed.
    pub fn fields(&self) -> &Value {
        &self.state.fields
    }

    /// One raw content field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.state.fields.get(key)
    }
}

impl<T: DeserializeOwned> EntityState<T> {
    fn from_entry(namespace: &Namespace, entry: AtomEntry) -> Result<Self> {
        let AtomEntry {
            title,
            id,
            author,
            updated,
            published,
            links,
            content: fields,
        } = entry;

        let content: T = serde_json::from_value(content_json(&fields)).map_err(|e| {
            ClientError::MalformedResponse(format!("content of entry '{title}': {e}"))
        })?;
        let acl = fields
            .get("eai:acl")
            .map(|acl| serde_json::from_value::<Acl>(acl.to_json()))
            .transpose()
            .map_err(|e| ClientError::MalformedResponse(format!("ACL of entry '{title}': {e}")))?;

        let namespace = match &acl {
            Some(acl) if namespace.has_wildcard() && !acl.owner.is_empty() && !acl.app.is_empty() => {
                Namespace::new(acl.owner.as_str(), acl.app.as_str())
            }
            _ => namespace.clone(),
        };

        Ok(Self {
            namespace,
            metadata: EntryMetadata {
                id,
                title,
                author,
                updated,
                published,
                links,
            },
            acl,
            fields,
            content,
        })
    }
}

/// Blank text content stands for an empty dictionary.
fn content_json(fields: &Value) -> serde_json::Value {
    match fields {
        Value::Text(t) if t.trim().is_empty() => serde_json::Value::Object(Default::default()),
        other => other.to_json(),
    }
}

fn select_entry(name: &ResourceName, feed: AtomFeed) -> Result<AtomEntry> {
    let mut entries = feed.entries;
    if let Some(title) = name.title()
        && let Some(index) = entries.iter().position(|e| e.title == title)
    {
        return Ok(entries.swap_remove(index));
    }
    if entries.len() == 1 {
        return entries
            .pop()
            .ok_or_else(|| ClientError::MalformedResponse("feed has no entries".to_string()));
    }
    Err(ClientError::MalformedResponse(format!(
        "feed for '{name}' has {} entries and none is titled '{}'",
        entries.len(),
        name.title().unwrap_or_default()
    )))
}
