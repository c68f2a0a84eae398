//! Saved search models for the `saved/searches` endpoints.

use serde::{Deserialize, Serialize};

use crate::serde_helpers::{opt_splunk_bool, splunk_bool};

/// A saved search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedSearch {
    #[serde(default)]
    pub search: String,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "splunk_bool")]
    pub disabled: bool,
    #[serde(default, deserialize_with = "opt_splunk_bool")]
    pub is_scheduled: Option<bool>,
    #[serde(default, deserialize_with = "opt_splunk_bool")]
    pub is_visible: Option<bool>,
    pub cron_schedule: Option<String>,
    pub next_scheduled_time: Option<String>,
    #[serde(rename = "dispatch.earliest_time")]
    pub dispatch_earliest_time: Option<String>,
    #[serde(rename = "dispatch.latest_time")]
    pub dispatch_latest_time: Option<String>,
    #[serde(rename = "alert.severity")]
    pub alert_severity: Option<String>,
    #[serde(rename = "action.email.to")]
    pub email_to: Option<String>,
}

/// Arguments for dispatching a saved search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchArgs {
    /// Override `dispatch.earliest_time`.
    pub earliest_time: Option<String>,
    /// Override `dispatch.latest_time`.
    pub latest_time: Option<String>,
    /// Run with the saved search's alert actions.
    pub trigger_actions: Option<bool>,
    /// Dispatch even when the search is scheduled.
    pub force_dispatch: Option<bool>,
    /// Extra `args.*` template values, without the `args.` prefix.
    pub template_args: Vec<(String, String)>,
}

impl DispatchArgs {
    pub(crate) fn to_args(&self) -> Vec<(String, String)> {
        let mut args = Vec::new();
        crate::form_params! { args =>
            "dispatch.earliest_time" => ref self.earliest_time,
            "dispatch.latest_time" => ref self.latest_time,
            "trigger_actions" => self.trigger_actions.map(u8::from),
            "force_dispatch" => self.force_dispatch.map(u8::from),
        }
        args.extend(
            self.template_args
                .iter()
                .map(|(k, v)| (format!("args.{k}"), v.clone())),
        );
        args
    }
}
