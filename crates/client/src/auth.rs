//! The token attached to requests.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// The credential a [`Context`](crate::Context) sends on every request.
#[derive(Clone)]
pub enum AuthToken {
    /// A session key from `auth/login`, sent as `Splunk <key>`.
    Session(SecretString),
    /// An API token, sent as `Bearer <token>`.
    Bearer(SecretString),
}

impl AuthToken {
    pub fn session(key: impl Into<String>) -> Self {
        let key: String = key.into();
        Self::Session(SecretString::new(key.into()))
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        let token: String = token.into();
        Self::Bearer(SecretString::new(token.into()))
    }

    /// Raw token value.
    pub fn expose(&self) -> &str {
        match self {
            Self::Session(s) | Self::Bearer(s) => s.expose_secret(),
        }
    }

    /// Value of the `Authorization` header.
    pub(crate) fn header_value(&self) -> String {
        match self {
            Self::Session(key) => format!("Splunk {}", key.expose_secret()),
            Self::Bearer(token) => format!("Bearer {}", token.expose_secret()),
        }
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Session(_) => f.write_str("AuthToken::Session([REDACTED])"),
            Self::Bearer(_) => f.write_str("AuthToken::Bearer([REDACTED])"),
        }
    }
}
