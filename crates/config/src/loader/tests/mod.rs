//! Tests for the configuration loader builder.
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::sync::Mutex;

pub mod dotenv_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Every variable `from_env` reads, for clearing with `temp_env`.
pub const SPLUNK_VARS: [&str; 8] = [
    "SPLUNK_BASE_URL",
    "SPLUNK_USERNAME",
    "SPLUNK_PASSWORD",
    "SPLUNK_API_TOKEN",
    "SPLUNK_SKIP_VERIFY",
    "SPLUNK_TIMEOUT",
    "SPLUNK_OWNER",
    "SPLUNK_APP",
];

/// Runs `f` with exactly `vars` set among the SPLUNK_* variables.
pub fn with_splunk_env<R>(vars: &[(&str, &str)], f: impl FnOnce() -> R) -> R {
    let all: Vec<(&str, Option<&str>)> = SPLUNK_VARS
        .iter()
        .map(|name| {
            let value = vars.iter().find(|(k, _)| k == name).map(|(_, v)| *v);
            (*name, value)
        })
        .collect();
    temp_env::with_vars(all, f)
}
