//! Types shared across resource models.
//!
//! This module contains the access-control list Splunk attaches to every
//! entry as `eai:acl`. It does NOT contain resource-specific models.

use serde::{Deserialize, Serialize};

use crate::serde_helpers::{empty_string_as_none, opt_splunk_bool};

/// Access control of one resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acl {
    #[serde(default)]
    pub app: String,
    #[serde(default)]
    pub owner: String,
    /// `user`, `app`, `global` or `system`.
    #[serde(default)]
    pub sharing: String,
    #[serde(default, deserialize_with = "opt_splunk_bool")]
    pub can_write: Option<bool>,
    #[serde(default, deserialize_with = "opt_splunk_bool")]
    pub can_change_perms: Option<bool>,
    #[serde(default, deserialize_with = "opt_splunk_bool")]
    pub can_share_app: Option<bool>,
    #[serde(default, deserialize_with = "opt_splunk_bool")]
    pub can_share_global: Option<bool>,
    #[serde(default, deserialize_with = "opt_splunk_bool")]
    pub can_share_user: Option<bool>,
    #[serde(default, deserialize_with = "opt_splunk_bool")]
    pub modifiable: Option<bool>,
    #[serde(default, deserialize_with = "opt_splunk_bool")]
    pub removable: Option<bool>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub perms: Option<Perms>,
}

/// Roles allowed to read and write a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Perms {
    #[serde(default)]
    pub read: Vec<String>,
    #[serde(default)]
    pub write: Vec<String>,
}
