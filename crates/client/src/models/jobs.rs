//! Search job models for the `search/jobs` endpoints.

use serde::{Deserialize, Serialize};

use crate::serde_helpers::{
    opt_f64_from_string_or_number, opt_splunk_bool, opt_u64_from_string_or_number,
};

/// A search job's status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub sid: String,
    pub label: Option<String>,
    #[serde(rename = "eventSearch")]
    pub event_search: Option<String>,
    #[serde(rename = "dispatchState")]
    pub dispatch_state: Option<String>,
    #[serde(rename = "isDone", default, deserialize_with = "opt_splunk_bool")]
    pub is_done: Option<bool>,
    #[serde(rename = "isFailed", default, deserialize_with = "opt_splunk_bool")]
    pub is_failed: Option<bool>,
    #[serde(rename = "isPaused", default, deserialize_with = "opt_splunk_bool")]
    pub is_paused: Option<bool>,
    #[serde(rename = "isFinalized", default, deserialize_with = "opt_splunk_bool")]
    pub is_finalized: Option<bool>,
    #[serde(
        rename = "doneProgress",
        default,
        deserialize_with = "opt_f64_from_string_or_number"
    )]
    pub done_progress: Option<f64>,
    #[serde(
        rename = "eventCount",
        default,
        deserialize_with = "opt_u64_from_string_or_number"
    )]
    pub event_count: Option<u64>,
    #[serde(
        rename = "resultCount",
        default,
        deserialize_with = "opt_u64_from_string_or_number"
    )]
    pub result_count: Option<u64>,
    #[serde(
        rename = "scanCount",
        default,
        deserialize_with = "opt_u64_from_string_or_number"
    )]
    pub scan_count: Option<u64>,
    #[serde(
        rename = "runDuration",
        default,
        deserialize_with = "opt_f64_from_string_or_number"
    )]
    pub run_duration: Option<f64>,
    #[serde(default, deserialize_with = "opt_u64_from_string_or_number")]
    pub ttl: Option<u64>,
}

/// Arguments for creating a search job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobArgs {
    pub earliest_time: Option<String>,
    pub latest_time: Option<String>,
    /// Caller-chosen search id.
    pub id: Option<String>,
    /// `normal`, `blocking` or `oneshot`.
    pub exec_mode: Option<String>,
    pub max_count: Option<u64>,
    pub ttl: Option<u64>,
}

impl JobArgs {
    pub(crate) fn to_args(&self) -> Vec<(String, String)> {
        let mut args = Vec::new();
        crate::form_params! { args =>
            "earliest_time" => ref self.earliest_time,
            "latest_time" => ref self.latest_time,
            "id" => ref self.id,
            "exec_mode" => ref self.exec_mode,
            "max_count" => self.max_count,
            "timeout" => self.ttl,
        }
        args
    }
}
