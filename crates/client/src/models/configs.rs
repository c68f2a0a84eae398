//! Configuration file models for the `properties` endpoints.
//!
//! # What this module handles:
//! - Content of configuration files, stanzas and individual settings
//!
//! # What this module does NOT handle:
//! - Direct HTTP API calls (see [`crate::endpoints::configs`])
//!
//! Splunk properties API endpoints:
//! - /services/properties - List configuration files
//! - /services/properties/{file} - List stanzas of a file
//! - /services/properties/{file}/{stanza} - List settings of a stanza
//! - /services/properties/{file}/{stanza}/{key} - A single value as plain text

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A configuration file such as `props`. Its entries carry no content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationFile {}

/// A stanza of a configuration file.
///
/// Different files have different schemas, so whatever the server reports
/// is kept as a dynamic map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationStanza {
    #[serde(flatten)]
    pub settings: BTreeMap<String, serde_json::Value>,
}

/// One `key = value` setting of a stanza. The entry title is the key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SettingContent")]
pub struct ConfigurationSetting {
    pub value: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SettingContent {
    Text(String),
    Empty(BTreeMap<String, serde_json::Value>),
}

impl From<SettingContent> for ConfigurationSetting {
    fn from(content: SettingContent) -> Self {
        match content {
            SettingContent::Text(value) => Self { value },
            SettingContent::Empty(_) => Self::default(),
        }
    }
}
