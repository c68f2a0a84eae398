//! A response whose body is still streaming.

use std::io;

use futures::TryStreamExt;
use reqwest::StatusCode;
use tokio::io::{AsyncBufRead, AsyncReadExt};
use tokio_util::io::StreamReader;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::atom::{AtomFeed, FeedReader, Message};
use crate::error::{ClientError, Result};

/// Buffered byte stream of a response body.
pub type Body = Box<dyn AsyncBufRead + Send + Unpin>;

/// Status, address and unread body of one HTTP exchange.
///
/// The body is consumed at most once: every reader method takes `self`.
pub struct Response {
    status: StatusCode,
    address: Url,
    body: Body,
    cancel: CancellationToken,
}

impl Response {
    pub(crate) fn from_reqwest(
        response: reqwest::Response,
        address: Url,
        cancel: CancellationToken,
    ) -> Self {
        let status = response.status();
        let stream = Box::pin(response.bytes_stream().map_err(io::Error::other));
        Self {
            status,
            address,
            body: Box::new(StreamReader::new(stream)),
            cancel,
        }
    }

    /// Build a response around an arbitrary body.
    pub fn new(status: StatusCode, address: Url, body: Body, cancel: CancellationToken) -> Self {
        Self {
            status,
            address,
            body,
            cancel,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn address(&self) -> &Url {
        &self.address
    }

    /// Take the raw body.
    pub fn into_body(self) -> Body {
        self.body
    }

    /// Pass the response through when its status is `expected`.
    ///
    /// Otherwise the body is read as a message document and the matching
    /// status error is returned. A body that is not a message document
    /// yields an error with no messages.
    pub async fn ensure_status(self, expected: StatusCode) -> Result<Self> {
        if self.status == expected {
            return Ok(self);
        }

        let status = self.status;
        let address = self.address.to_string();
        let mut reader = FeedReader::new(self.body, self.cancel);
        let messages = match Message::read_messages(&mut reader).await {
            Ok(messages) => messages,
            Err(ClientError::Cancelled) => return Err(ClientError::Cancelled),
            Err(e) => {
                debug!(
                    status = status.as_u16(),
                    error = %e,
                    "Error response body carried no readable messages"
                );
                Vec::new()
            }
        };
        debug!(
            status = status.as_u16(),
            expected = expected.as_u16(),
            address = %address,
            messages = messages.len(),
            "Unexpected response status"
        );
        Err(ClientError::from_status(status.as_u16(), address, messages))
    }

    /// Parse the body as an Atom `<feed>` or `<response>` document.
    pub async fn feed(self) -> Result<AtomFeed> {
        let mut reader = FeedReader::new(self.body, self.cancel);
        AtomFeed::read_xml(&mut reader).await
    }

    /// Parse only the `<messages>` block of the body.
    pub async fn messages(self) -> Result<Vec<Message>> {
        let mut reader = FeedReader::new(self.body, self.cancel);
        Message::read_messages(&mut reader).await
    }

    /// Read the body as UTF-8 text.
    pub async fn text(mut self) -> Result<String> {
        let mut text = String::new();
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(ClientError::Cancelled),
            read = self.body.read_to_string(&mut text) => {
                read?;
            }
        }
        Ok(text)
    }
}

impl std::fmt::Debug for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("address", &self.address.as_str())
            .finish_non_exhaustive()
    }
}
