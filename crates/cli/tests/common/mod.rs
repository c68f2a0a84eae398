//! Shared test utilities for splunk-sdk-cli integration tests.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper are hermetic by default.
//! - `SPLUNK_API_TOKEN` is set to "test-token" unless overridden.

#![allow(dead_code)]

use assert_cmd::Command;
use wiremock::ResponseTemplate;

pub use splunk_sdk::testing::load_fixture;

/// Returns a hermetic `splunk-sdk-cli` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - `SPLUNK_API_TOKEN` is set to a dummy value to satisfy config validation.
/// - Other SPLUNK_* variables are cleared to ensure no leakage from the host.
pub fn splunk_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("splunk-sdk-cli");

    cmd.env("DOTENV_DISABLED", "1");
    cmd.env("SPLUNK_API_TOKEN", "test-token");

    cmd.env_remove("SPLUNK_BASE_URL")
        .env_remove("SPLUNK_USERNAME")
        .env_remove("SPLUNK_PASSWORD")
        .env_remove("SPLUNK_SKIP_VERIFY")
        .env_remove("SPLUNK_TIMEOUT")
        .env_remove("SPLUNK_OWNER")
        .env_remove("SPLUNK_APP")
        .env_remove("RUST_LOG");

    cmd
}

/// Returns a hermetic command pointed at `base_url`.
pub fn splunk_cmd_with_base_url(base_url: &str) -> Command {
    let mut cmd = splunk_cmd();
    cmd.env("SPLUNK_BASE_URL", base_url);
    cmd
}

/// An XML response with the body of `fixture`.
pub fn xml(status: u16, fixture: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_raw(load_fixture(fixture), "text/xml")
}
