//! Typed entry content for Splunk resources.
//!
//! Each model is the serde view of an entry's `<content>` dictionary.
//! Types are organized by resource in submodules and re-exported here
//! for convenient access.

pub mod apps;
pub mod common;
pub mod configs;
pub mod jobs;
pub mod saved_searches;

pub use apps::{
    Application, ApplicationArchiveInfo, ApplicationAttributes, ApplicationSetupInfo,
    ApplicationUpdateInfo,
};
pub use common::{Acl, Perms};
pub use configs::{ConfigurationFile, ConfigurationSetting, ConfigurationStanza};
pub use jobs::{Job, JobArgs};
pub use saved_searches::{DispatchArgs, SavedSearch};
