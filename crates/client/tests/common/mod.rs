//! Common test utilities for integration tests.
//!
//! This module provides shared helper functions and re-exports commonly used
//! types for testing the Splunk SDK against a wiremock server.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - Every service built here talks plain HTTP to the mock server
//!
//! # What this does NOT handle
//! - Mock setup (use wiremock directly in tests)
//! - Test-specific assertions or test logic

// Re-export test utilities from splunk-sdk
#[allow(unused_imports)]
pub use splunk_sdk::testing::load_fixture;

// Re-export commonly used types for test convenience
// These are used via `use common::*;` in test files
#[allow(unused_imports)]
pub use splunk_sdk::{AuthToken, ClientError, Context, ErrorKind, Namespace, Service};
#[allow(unused_imports)]
pub use tokio_util::sync::CancellationToken;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// A service pointed at `server` with no credentials.
#[allow(dead_code)]
pub fn anonymous_service(server: &MockServer) -> Service {
    let context = Context::builder()
        .base_url(server.uri())
        .build()
        .expect("mock server URI is a valid base URL");
    Service::new(context)
}

/// A service pointed at `server` that sends `Authorization: Splunk test-token`.
#[allow(dead_code)]
pub async fn service(server: &MockServer) -> Service {
    let service = anonymous_service(server);
    service
        .context()
        .set_token(AuthToken::session("test-token"))
        .await;
    service
}

/// A response carrying an XML fixture.
#[allow(dead_code)]
pub fn xml(status: u16, fixture: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_raw(load_fixture(fixture), "text/xml")
}
