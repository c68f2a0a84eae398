//! Splunk REST object model.
//!
//! This crate addresses Splunk resources by namespace and path, sends
//! requests through a shared [`Context`], and materializes the Atom/XML
//! feeds the server answers with into typed [`Entity`] and
//! [`EntityCollection`] values. Session key and API token authentication
//! are both supported.
//!
//! ```rust,ignore
//! use splunk_sdk::{Context, Service};
//! use tokio_util::sync::CancellationToken;
//!
//! let cancel = CancellationToken::new();
//! let service = Service::new(Context::builder().base_url("https://localhost:8089").build()?);
//! service.log_on("admin", "changeme", &cancel).await?;
//! let apps = service.applications().get_all(&cancel).await?;
//! for app in &apps {
//!     println!("{} {:?}", app.title(), app.content().version);
//! }
//! ```

pub mod addressing;
pub mod atom;
mod auth;
pub mod context;
pub mod endpoints;
pub mod entity;
pub mod error;
pub mod models;
mod serde_helpers;
mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use addressing::{Namespace, ResourceName, Scope};
pub use atom::{AtomFeed, Message, Pagination, Severity, Value};
pub use auth::AuthToken;
pub use context::{Context, ContextBuilder, Response};
pub use endpoints::{
    CollectionEndpoint, ConfigurationFileEndpoint, EntityEndpoint, ResourceKind, StanzaEndpoint,
};
pub use entity::{Entity, EntityCollection, EntryName};
pub use error::{ClientError, ErrorKind, Result};
pub use service::Service;
