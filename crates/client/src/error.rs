//! Error types for the Splunk SDK.
//!
//! Every failure is surfaced to the immediate caller; nothing here retries.
//! HTTP status failures carry the resource address and the diagnostic
//! messages Splunk put in the response body.

use thiserror::Error;

use crate::atom::Message;

/// Result type alias for SDK operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Coarse classification of a [`ClientError`].
///
/// Callers decide on recovery by matching on the kind rather than on the
/// full error value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The body did not match the Atom feed grammar.
    MalformedResponse,
    /// HTTP 404 on an address.
    NotFound,
    /// HTTP 401 or 403.
    AuthenticationFailure,
    /// Any other unexpected HTTP status.
    RequestFailed,
    /// Bad input rejected before any network call.
    InvalidArgument,
    /// The connection or body stream failed.
    Transport,
    /// The call's cancellation token fired.
    Cancelled,
}

/// Errors that can occur during Splunk SDK operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The response body does not match the expected feed grammar.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The addressed resource does not exist.
    #[error("Resource not found at {address}{}", format_messages(.messages))]
    NotFound {
        address: String,
        messages: Vec<Message>,
    },

    /// The server rejected the credentials or the session.
    #[error("Authentication failed ({status}) at {address}{}", format_messages(.messages))]
    AuthFailed {
        status: u16,
        address: String,
        messages: Vec<Message>,
    },

    /// The server answered with an unexpected status.
    #[error("Request failed ({status}) at {address}{}", format_messages(.messages))]
    RequestFailed {
        status: u16,
        address: String,
        messages: Vec<Message>,
    },

    /// Malformed input to a constructor.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// HTTP request error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Reading the response body failed mid-stream.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The operation was cancelled by its token.
    #[error("Operation cancelled")]
    Cancelled,
}

fn format_messages(messages: &[Message]) -> String {
    if messages.is_empty() {
        return String::new();
    }
    let joined = messages
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join("; ");
    format!(": {joined}")
}

impl ClientError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedResponse(_) => ErrorKind::MalformedResponse,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::AuthFailed { .. } => ErrorKind::AuthenticationFailure,
            Self::RequestFailed { .. } => ErrorKind::RequestFailed,
            Self::InvalidArgument(_) | Self::InvalidUrl(_) => ErrorKind::InvalidArgument,
            Self::HttpError(_) | Self::Transport(_) => ErrorKind::Transport,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// Build the status error for an unexpected HTTP status.
    pub(crate) fn from_status(status: u16, address: String, messages: Vec<Message>) -> Self {
        match status {
            404 => Self::NotFound { address, messages },
            401 | 403 => Self::AuthFailed {
                status,
                address,
                messages,
            },
            _ => Self::RequestFailed {
                status,
                address,
                messages,
            },
        }
    }

    /// HTTP status code, when the error came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::AuthFailed { status, .. } | Self::RequestFailed { status, .. } => Some(*status),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Diagnostic messages parsed from the response body.
    pub fn messages(&self) -> &[Message] {
        match self {
            Self::NotFound { messages, .. }
            | Self::AuthFailed { messages, .. }
            | Self::RequestFailed { messages, .. } => messages,
            _ => &[],
        }
    }

    /// Check if this error means the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Check if this error indicates authentication failure.
    pub fn is_auth_error(&self) -> bool {
        self.kind() == ErrorKind::AuthenticationFailure
    }
}

impl From<quick_xml::Error> for ClientError {
    fn from(err: quick_xml::Error) -> Self {
        match err {
            quick_xml::Error::Io(io) => Self::Transport(io.to_string()),
            other => Self::MalformedResponse(other.to_string()),
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for ClientError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Severity;

    #[test]
    fn test_from_status_maps_kinds() {
        let err = ClientError::from_status(404, "https://h:8089/services/x".into(), vec![]);
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(404));

        let err = ClientError::from_status(401, "a".into(), vec![]);
        assert!(err.is_auth_error());
        let err = ClientError::from_status(403, "a".into(), vec![]);
        assert!(err.is_auth_error());

        let err = ClientError::from_status(500, "a".into(), vec![]);
        assert_eq!(err.kind(), ErrorKind::RequestFailed);
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_display_includes_messages() {
        let err = ClientError::from_status(
            404,
            "https://localhost:8089/services/apps/local/nope".into(),
            vec![Message::new(Severity::Error, "Could not find object id=nope")],
        );
        assert_eq!(
            err.to_string(),
            "Resource not found at https://localhost:8089/services/apps/local/nope: ERROR: Could not find object id=nope"
        );
        assert_eq!(err.messages().len(), 1);
    }

    #[test]
    fn test_display_without_messages() {
        let err = ClientError::from_status(502, "https://h/x".into(), vec![]);
        assert_eq!(err.to_string(), "Request failed (502) at https://h/x");
        assert!(err.messages().is_empty());
    }

    #[test]
    fn test_non_status_errors_have_no_status() {
        assert_eq!(ClientError::Cancelled.status(), None);
        assert_eq!(ClientError::Cancelled.kind(), ErrorKind::Cancelled);
        assert_eq!(
            ClientError::InvalidArgument("x".into()).kind(),
            ErrorKind::InvalidArgument
        );
    }
}
