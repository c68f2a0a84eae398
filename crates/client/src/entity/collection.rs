//! A page of entities read from a collection endpoint.

use std::ops::Index;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::addressing::{Namespace, ResourceName};
use crate::atom::{AtomEntry, AtomFeed, Message, Pagination, Value};
use crate::context::Context;
use crate::entity::Entity;
use crate::error::{ClientError, Result};

/// Which part of an entry names its resource inside the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryName {
    /// The entry title; true for most resources.
    #[default]
    Title,
    /// A content field, for resources whose title is descriptive text
    /// (a job's title is its search string; its name is `sid`).
    Field(&'static str),
}

impl EntryName {
    fn resolve(self, entry: &AtomEntry) -> Result<String> {
        match self {
            Self::Title => Ok(entry.title.clone()),
            Self::Field(key) => entry
                .content
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| {
                    ClientError::MalformedResponse(format!(
                        "entry '{}' has no '{key}' field",
                        entry.title
                    ))
                }),
        }
    }
}

/// Entities of one kind plus the paging window they came from.
#[derive(Debug, Clone)]
pub struct EntityCollection<T> {
    context: Arc<Context>,
    namespace: Namespace,
    name: ResourceName,
    entry_name: EntryName,
    entities: Vec<Entity<T>>,
    pagination: Pagination,
    messages: Vec<Message>,
}

impl<T: DeserializeOwned> EntityCollection<T> {
    /// Materialize every entry of `feed` as `collection_name + title`.
    pub fn from_feed(
        context: Arc<Context>,
        namespace: Namespace,
        collection_name: ResourceName,
        feed: AtomFeed,
    ) -> Result<Self> {
        Self::from_feed_named(context, namespace, collection_name, feed, EntryName::Title)
    }

    /// Like [`from_feed`](Self::from_feed) with a chosen naming rule.
    pub fn from_feed_named(
        context: Arc<Context>,
        namespace: Namespace,
        collection_name: ResourceName,
        feed: AtomFeed,
        entry_name: EntryName,
    ) -> Result<Self> {
        let mut collection = Self {
            context: Arc::clone(&context),
            namespace,
            name: collection_name,
            entry_name,
            entities: Vec::new(),
            pagination: Pagination::default(),
            messages: Vec::new(),
        };
        collection.initialize(context, feed)?;
        Ok(collection)
    }

    /// Replace the contents with those of `feed`. On error nothing changes.
    pub fn initialize(&mut self, context: Arc<Context>, feed: AtomFeed) -> Result<()> {
        let AtomFeed {
            entries,
            pagination,
            messages,
            ..
        } = feed;
        let entities = entries
            .into_iter()
            .map(|entry| {
                let title = self.entry_name.resolve(&entry)?;
                Entity::from_entry(
                    Arc::clone(&context),
                    self.namespace.clone(),
                    self.name.join([title]),
                    entry,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        self.context = context;
        self.entities = entities;
        self.pagination = pagination;
        self.messages = messages;
        Ok(())
    }
}

impl<T> EntityCollection<T> {
    pub fn context(&self) -> &Arc<Context> {
        &self.context
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn name(&self) -> &ResourceName {
        &self.name
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Messages the server attached to the feed.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entity<T>> {
        self.entities.get(index)
    }

    /// The entity whose resource name ends in `title`.
    pub fn find(&self, title: &str) -> Option<&Entity<T>> {
        self.entities.iter().find(|e| e.name().title() == Some(title))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity<T>> {
        self.entities.iter()
    }

    pub fn into_entities(self) -> Vec<Entity<T>> {
        self.entities
    }
}

impl<T> Index<usize> for EntityCollection<T> {
    type Output = Entity<T>;

    fn index(&self, index: usize) -> &Entity<T> {
        &self.entities[index]
    }
}

impl<'a, T> IntoIterator for &'a EntityCollection<T> {
    type Item = &'a Entity<T>;
    type IntoIter = std::slice::Iter<'a, Entity<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}

impl<T> IntoIterator for EntityCollection<T> {
    type Item = Entity<T>;
    type IntoIter = std::vec::IntoIter<Entity<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.into_iter()
    }
}
