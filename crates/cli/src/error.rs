//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map ClientError kinds and statuses to exit codes.
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use splunk_sdk::{ClientError, ErrorKind};
use splunk_sdk_config::ConfigError;

/// Structured exit codes for splunk-sdk-cli.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Authentication failure - invalid credentials or expired session.
    AuthenticationFailed = 2,

    /// Connection error - network, timeout, or DNS failure.
    ConnectionError = 3,

    /// Resource not found - app, stanza, saved search, job.
    NotFound = 4,

    /// Validation error - bad arguments or configuration.
    ValidationError = 5,

    /// Permission denied - insufficient privileges (HTTP 403).
    PermissionDenied = 6,

    /// The server answered with something that is not a valid feed.
    MalformedResponse = 7,

    /// Service unavailable - HTTP 502/503/504.
    ServiceUnavailable = 8,

    /// Interrupted - SIGINT/Ctrl+C (Unix standard: 128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err.kind() {
            ErrorKind::AuthenticationFailure if err.status() == Some(403) => {
                ExitCode::PermissionDenied
            }
            ErrorKind::AuthenticationFailure => ExitCode::AuthenticationFailed,
            ErrorKind::NotFound => ExitCode::NotFound,
            ErrorKind::InvalidArgument => ExitCode::ValidationError,
            ErrorKind::Transport => ExitCode::ConnectionError,
            ErrorKind::MalformedResponse => ExitCode::MalformedResponse,
            ErrorKind::Cancelled => ExitCode::Interrupted,
            ErrorKind::RequestFailed => match err.status() {
                Some(400) => ExitCode::ValidationError,
                Some(502..=504) => ExitCode::ServiceUnavailable,
                _ => ExitCode::GeneralError,
            },
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_err);
            }
            if cause.downcast_ref::<ConfigError>().is_some() {
                return ExitCode::ValidationError;
            }
        }
        ExitCode::GeneralError
    }
}
