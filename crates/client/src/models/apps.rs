//! App models for the `apps/local` endpoints.

use serde::{Deserialize, Serialize};

use crate::serde_helpers::{opt_splunk_bool, opt_u64_from_string_or_number, splunk_bool};

/// An installed Splunk app.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub label: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    #[serde(default, deserialize_with = "splunk_bool")]
    pub disabled: bool,
    #[serde(default, deserialize_with = "opt_splunk_bool")]
    pub visible: Option<bool>,
    #[serde(default, deserialize_with = "opt_splunk_bool")]
    pub configured: Option<bool>,
    #[serde(default, deserialize_with = "opt_splunk_bool")]
    pub check_for_updates: Option<bool>,
    #[serde(default, deserialize_with = "opt_splunk_bool")]
    pub state_change_requires_restart: Option<bool>,
}

/// Setup information of an app (`apps/local/{name}/setup`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationSetupInfo {
    /// The app's setup XML, when it has one.
    #[serde(rename = "eai:setup")]
    pub setup: Option<String>,
    #[serde(default, deserialize_with = "opt_splunk_bool")]
    pub refresh: Option<bool>,
}

/// Update information of an app (`apps/local/{name}/update`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationUpdateInfo {
    #[serde(rename = "update.checksum")]
    pub checksum: Option<String>,
    #[serde(rename = "update.checksum.type")]
    pub checksum_type: Option<String>,
    #[serde(rename = "update.homepage")]
    pub homepage: Option<String>,
    #[serde(rename = "update.name")]
    pub name: Option<String>,
    #[serde(
        rename = "update.size",
        default,
        deserialize_with = "opt_u64_from_string_or_number"
    )]
    pub size: Option<u64>,
    #[serde(rename = "update.version")]
    pub version: Option<String>,
    #[serde(rename = "update.appurl")]
    pub app_url: Option<String>,
    #[serde(
        rename = "update.implicit_id_required",
        default,
        deserialize_with = "opt_splunk_bool"
    )]
    pub implicit_id_required: Option<bool>,
}

/// Result of packaging an app (`apps/local/{name}/package`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationArchiveInfo {
    pub name: Option<String>,
    /// Archive location on the server's filesystem.
    pub path: Option<String>,
    /// Download URL of the archive.
    pub url: Option<String>,
}

/// App attributes settable through `update_attributes` and
/// `create_from_template`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationAttributes {
    pub author: Option<String>,
    pub description: Option<String>,
    pub label: Option<String>,
    pub version: Option<String>,
    pub visible: Option<bool>,
}

impl ApplicationAttributes {
    pub(crate) fn to_args(&self) -> Vec<(String, String)> {
        let mut args = Vec::new();
        crate::form_params! { args =>
            "author" => ref self.author,
            "description" => ref self.description,
            "label" => ref self.label,
            "version" => ref self.version,
            "visible" => self.visible,
        }
        args
    }
}
