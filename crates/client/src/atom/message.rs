//! Diagnostic messages embedded in Splunk responses.
//!
//! Splunk reports warnings and errors as `<msg type="...">` elements inside
//! a `<messages>` block at the top of a feed or response document.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tokio::io::AsyncBufRead;

use crate::atom::reader::{FeedReader, Node, attribute, local_name, unexpected_eof};
use crate::error::{ClientError, Result};

/// Severity of a server message, ordered from least to most severe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
    Fatal = 4,
}

impl Severity {
    /// Every severity in ascending order.
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
    ];

    /// Upper-case wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ClientError;

    /// Parse a wire name, ignoring case.
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|sev| sev.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ClientError::InvalidArgument(format!("unknown message severity '{s}'")))
    }
}

impl TryFrom<u8> for Severity {
    type Error = ClientError;

    fn try_from(value: u8) -> Result<Self> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| ClientError::InvalidArgument(format!("severity {value} out of range")))
    }
}

/// A (severity, text) pair reported by the server.
///
/// Messages order by severity first, then by text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Message {
    pub severity: Severity,
    pub text: String,
}

impl Message {
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }

    /// Read the messages of a `<response>` or `<feed>` document.
    ///
    /// Everything other than the `<messages>` block is skipped. A document
    /// without one yields an empty list.
    ///
    /// # Errors
    ///
    /// [`ClientError::MalformedResponse`] when the root is neither `<response>`
    /// nor `<feed>`, when `<messages>` holds anything but `<msg>`, when a
    /// `type` is unknown, or when a `<msg>` with text has no `type`. An empty
    /// `<msg>` without a `type` is skipped.
    pub async fn read_messages<R>(reader: &mut FeedReader<R>) -> Result<Vec<Message>>
    where
        R: AsyncBufRead + Unpin + Send,
    {
        let root = reader.read_root(&["response", "feed"]).await?;
        let root_name = local_name(&root);
        let mut messages = Vec::new();
        loop {
            match reader.next_significant().await? {
                Node::Start(e) if local_name(&e) == "messages" => {
                    messages.extend(read_messages_block(reader).await?);
                }
                Node::Start(e) => reader.skip_element(&local_name(&e)).await?,
                Node::Text(_) => {}
                Node::End(_) => return Ok(messages),
                Node::Eof => return Err(unexpected_eof(&root_name)),
            }
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.text)
    }
}

/// Contents of a `<messages>` element whose start tag was just read.
pub(crate) async fn read_messages_block<R>(reader: &mut FeedReader<R>) -> Result<Vec<Message>>
where
    R: AsyncBufRead + Unpin + Send,
{
    let mut messages = Vec::new();
    loop {
        match reader.next_significant().await? {
            Node::Start(e) if local_name(&e) == "msg" => {
                let kind = attribute(&e, "type")?.filter(|kind| !kind.is_empty());
                let text = reader.read_text("msg").await?;
                let Some(kind) = kind else {
                    // `auth/login` answers with a placeholder `<msg code=""></msg>`.
                    if text.trim().is_empty() {
                        continue;
                    }
                    return Err(ClientError::MalformedResponse(
                        "<msg> without a type attribute".to_string(),
                    ));
                };
                let severity = kind
                    .parse::<Severity>()
                    .map_err(|e| ClientError::MalformedResponse(e.to_string()))?;
                messages.push(Message::new(severity, text));
            }
            Node::Start(e) => {
                return Err(ClientError::MalformedResponse(format!(
                    "expected <msg> inside <messages>, found <{}>",
                    local_name(&e)
                )));
            }
            Node::Text(t) => {
                return Err(ClientError::MalformedResponse(format!(
                    "unexpected text inside <messages>: '{}'",
                    t.trim()
                )));
            }
            Node::End(_) => return Ok(messages),
            Node::Eof => return Err(unexpected_eof("messages")),
        }
    }
}
