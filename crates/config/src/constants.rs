//! Centralized constants for the Splunk SDK workspace.
//!
//! This module contains default values and environment variable names used
//! across crates to avoid magic number duplication.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default scheme of the management endpoint.
pub const DEFAULT_SCHEME: &str = "https";

/// Default host of the management endpoint.
pub const DEFAULT_HOST: &str = "localhost";

/// Default Splunk management port.
pub const DEFAULT_SPLUNK_PORT: u16 = 8089;

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

// =============================================================================
// Environment Variables
// =============================================================================

pub const ENV_BASE_URL: &str = "SPLUNK_BASE_URL";
pub const ENV_USERNAME: &str = "SPLUNK_USERNAME";
pub const ENV_PASSWORD: &str = "SPLUNK_PASSWORD";
pub const ENV_API_TOKEN: &str = "SPLUNK_API_TOKEN";
pub const ENV_SKIP_VERIFY: &str = "SPLUNK_SKIP_VERIFY";
pub const ENV_TIMEOUT: &str = "SPLUNK_TIMEOUT";
pub const ENV_OWNER: &str = "SPLUNK_OWNER";
pub const ENV_APP: &str = "SPLUNK_APP";

/// Set to `1` or `true` to skip `.env` loading.
pub const ENV_DOTENV_DISABLED: &str = "DOTENV_DISABLED";
