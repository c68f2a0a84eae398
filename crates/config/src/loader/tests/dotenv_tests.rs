//! Tests for dotenv loading behavior.
//!
//! Invariants / Assumptions:
//! - Tests use `env_lock()` and `#[serial]` to prevent cross-test contamination.
//! - Tests must serialize mutations to process-global state (cwd/env).
//! - Error messages must never contain secret values from `.env` files.

use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use super::{SPLUNK_VARS, env_lock};
use crate::loader::builder::ConfigLoader;
use crate::loader::error::ConfigError;
use crate::types::AuthStrategy;

/// RAII guard for temporarily changing the current working directory.
struct CwdGuard {
    original_dir: PathBuf,
}

impl CwdGuard {
    fn new(temp_dir: &TempDir) -> Self {
        let original_dir = std::env::current_dir().expect("Failed to get current directory");
        std::env::set_current_dir(temp_dir.path()).expect("Failed to set current directory");
        Self { original_dir }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original_dir);
    }
}

/// Runs `f` with dotenv enabled and every SPLUNK_* variable unset; restores them afterwards.
fn with_dotenv_enabled<R>(f: impl FnOnce() -> R) -> R {
    let mut vars: Vec<(&str, Option<&str>)> = SPLUNK_VARS.iter().map(|v| (*v, None)).collect();
    vars.push(("DOTENV_DISABLED", None));
    temp_env::with_vars(vars, f)
}

#[test]
#[serial]
fn test_missing_dotenv_is_ok() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let _cwd_guard = CwdGuard::new(&temp_dir);

    let result = with_dotenv_enabled(|| ConfigLoader::new().load_dotenv());

    assert!(
        result.is_ok(),
        "Missing .env file should be silently ignored"
    );
}

#[test]
#[serial]
fn test_dotenv_values_feed_from_env() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let _cwd_guard = CwdGuard::new(&temp_dir);

    fs::write(
        temp_dir.path().join(".env"),
        "SPLUNK_BASE_URL=https://example.com:8089\nSPLUNK_API_TOKEN=test-token\nSPLUNK_APP=search\n",
    )
    .unwrap();

    let config = with_dotenv_enabled(|| {
        ConfigLoader::new()
            .load_dotenv()
            .unwrap()
            .from_env()
            .unwrap()
            .build()
            .unwrap()
    });

    assert_eq!(config.connection.base_url, "https://example.com:8089");
    assert!(matches!(config.auth.strategy, AuthStrategy::ApiToken { .. }));
    assert_eq!(config.namespace.app.as_deref(), Some("search"));
    assert_eq!(config.namespace.owner, None);
}

#[test]
#[serial]
fn test_process_env_wins_over_dotenv() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let _cwd_guard = CwdGuard::new(&temp_dir);

    fs::write(
        temp_dir.path().join(".env"),
        "SPLUNK_BASE_URL=https://from-dotenv:8089\n",
    )
    .unwrap();

    let base_url = with_dotenv_enabled(|| {
        temp_env::with_var("SPLUNK_BASE_URL", Some("https://from-env:8089"), || {
            ConfigLoader::new().load_dotenv().unwrap();
            std::env::var("SPLUNK_BASE_URL").unwrap()
        })
    });

    assert_eq!(base_url, "https://from-env:8089");
}

#[test]
#[serial]
fn test_invalid_dotenv_returns_parse_error() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let _cwd_guard = CwdGuard::new(&temp_dir);

    // A line with no '='
    fs::write(temp_dir.path().join(".env"), "INVALID_LINE_WITHOUT_EQUALS").unwrap();

    let result = with_dotenv_enabled(|| ConfigLoader::new().load_dotenv());

    match result {
        Err(ConfigError::DotenvParse { .. }) => {}
        Err(other) => panic!(
            "Invalid .env should return DotenvParse error, got {}",
            other
        ),
        Ok(_) => panic!("Invalid .env should return DotenvParse error, got Ok"),
    }
}

#[test]
#[serial]
fn test_dotenv_parse_error_does_not_leak_secrets() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let _cwd_guard = CwdGuard::new(&temp_dir);

    let secret_value = "supersecret_token_12345";

    fs::write(
        temp_dir.path().join(".env"),
        format!(
            "SPLUNK_PASSWORD={}\nINVALID_LINE_WITHOUT_EQUALS",
            secret_value
        ),
    )
    .unwrap();

    let result = with_dotenv_enabled(|| ConfigLoader::new().load_dotenv());

    match &result {
        Err(e) => {
            let error_string = e.to_string();
            assert!(
                !error_string.contains(secret_value),
                "Error message should NOT contain the secret value: {}",
                error_string
            );
            assert!(
                error_string.contains("DOTENV_DISABLED"),
                "Error should hint about DOTENV_DISABLED: {}",
                error_string
            );
        }
        Ok(_) => panic!("Expected error for invalid .env file, got Ok"),
    }
}

#[test]
#[serial]
fn test_dotenv_disabled_values() {
    let _lock = env_lock().lock().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let _cwd_guard = CwdGuard::new(&temp_dir);

    fs::write(temp_dir.path().join(".env"), "INVALID_LINE_WITHOUT_EQUALS").unwrap();

    for value in ["1", "true"] {
        let result = temp_env::with_var("DOTENV_DISABLED", Some(value), || {
            ConfigLoader::new().load_dotenv()
        });
        assert!(
            result.is_ok(),
            "DOTENV_DISABLED={value} should skip .env loading even if file is invalid"
        );
    }

    let result = temp_env::with_var("DOTENV_DISABLED", Some("false"), || {
        ConfigLoader::new().load_dotenv()
    });
    assert!(
        matches!(result, Err(ConfigError::DotenvParse { .. })),
        "DOTENV_DISABLED=false should NOT disable dotenv loading"
    );
}
