//! CLI cancellation utilities.
//!
//! Responsibilities:
//! - Install the Ctrl+C/SIGINT handler that cancels the shared token.
//! - Recognize cancellation errors coming back through `anyhow::Result`.
//! - Centralize the cancellation message.
//!
//! Does NOT handle:
//! - Deciding *when* to check for cancellation; the client observes the token
//!   on every request.
//!
//! Invariants:
//! - Once cancelled, the token remains cancelled forever.

use splunk_sdk::{ClientError, ErrorKind};
use tokio_util::sync::CancellationToken;

/// Spawn a task that cancels `token` on the first Ctrl+C.
pub fn cancel_on_ctrl_c(token: &CancellationToken) {
    let token = token.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
            return;
        }
        tracing::debug!("Ctrl+C received, cancelling in-flight request");
        token.cancel();
    });
}

/// Returns true if this anyhow error represents a cancellation.
pub fn is_cancelled_error(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<ClientError>()
            .is_some_and(|e| e.kind() == ErrorKind::Cancelled)
    })
}

/// Print standard cancellation message to stderr.
pub fn print_cancelled_message() {
    eprintln!("^C\nOperation cancelled by user");
}
