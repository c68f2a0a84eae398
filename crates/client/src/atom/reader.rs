//! Forward-only async XML reader used by the feed parser.
//!
//! Wraps `quick_xml`'s async reader, reduces its event stream to the few node
//! kinds the Atom grammar cares about, and checks the cancellation token
//! before every event so a large feed can be abandoned between elements.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tokio::io::AsyncBufRead;
use tokio_util::sync::CancellationToken;

use crate::error::{ClientError, Result};

/// A reduced XML event.
#[derive(Debug)]
pub(crate) enum Node {
    Start(BytesStart<'static>),
    End(String),
    Text(String),
    Eof,
}

/// Streaming reader over an XML document.
pub struct FeedReader<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
    cancel: CancellationToken,
}

impl<R> FeedReader<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    /// Wrap a buffered async source. Empty elements such as `<link/>` are
    /// reported as a start immediately followed by an end.
    pub fn new(inner: R, cancel: CancellationToken) -> Self {
        let mut reader = Reader::from_reader(inner);
        reader.config_mut().expand_empty_elements = true;
        Self {
            reader,
            buf: Vec::new(),
            cancel,
        }
    }

    /// Reader with a token that is never cancelled.
    pub fn uncancellable(inner: R) -> Self {
        Self::new(inner, CancellationToken::new())
    }

    /// Give back the underlying source.
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }

    /// Next node, skipping declarations, comments, processing instructions
    /// and doctypes.
    pub(crate) async fn next(&mut self) -> Result<Node> {
        loop {
            if self.cancel.is_cancelled() {
                return Err(ClientError::Cancelled);
            }
            self.buf.clear();
            let event = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(ClientError::Cancelled),
                event = self.reader.read_event_into_async(&mut self.buf) => event?,
            };
            let node = match event {
                Event::Start(e) => Node::Start(e.into_owned()),
                Event::End(e) => {
                    Node::End(String::from_utf8_lossy(e.local_name().as_ref()).into_owned())
                }
                Event::Text(t) => Node::Text(t.unescape()?.into_owned()),
                Event::CData(c) => Node::Text(
                    String::from_utf8(c.into_inner().into_owned())
                        .map_err(|e| ClientError::MalformedResponse(e.to_string()))?,
                ),
                Event::Eof => Node::Eof,
                _ => continue,
            };
            return Ok(node);
        }
    }

    /// Next node that is not whitespace-only text.
    pub(crate) async fn next_significant(&mut self) -> Result<Node> {
        loop {
            match self.next().await? {
                Node::Text(t) if t.trim().is_empty() => continue,
                node => return Ok(node),
            }
        }
    }

    /// Read up to the document element and check its name.
    pub(crate) async fn read_root(&mut self, allowed: &[&str]) -> Result<BytesStart<'static>> {
        match self.next_significant().await? {
            Node::Start(e) => {
                let name = local_name(&e);
                if allowed.contains(&name.as_str()) {
                    Ok(e)
                } else {
                    Err(ClientError::MalformedResponse(format!(
                        "expected root element <{}>, found <{name}>",
                        allowed.join("> or <")
                    )))
                }
            }
            Node::Eof => Err(ClientError::MalformedResponse(
                "empty response document".to_string(),
            )),
            other => Err(ClientError::MalformedResponse(format!(
                "expected root element, found {other:?}"
            ))),
        }
    }

    /// Text content of the element whose start tag was just read.
    pub(crate) async fn read_text(&mut self, element: &str) -> Result<String> {
        let mut text = String::new();
        loop {
            match self.next().await? {
                Node::Text(t) => text.push_str(&t),
                Node::End(_) => return Ok(text),
                Node::Start(e) => {
                    return Err(ClientError::MalformedResponse(format!(
                        "unexpected <{}> inside <{element}>",
                        local_name(&e)
                    )));
                }
                Node::Eof => return Err(unexpected_eof(element)),
            }
        }
    }

    /// Skip the rest of the element whose start tag was just read.
    pub(crate) async fn skip_element(&mut self, element: &str) -> Result<()> {
        let mut depth = 1usize;
        loop {
            match self.next().await? {
                Node::Start(_) => depth += 1,
                Node::End(_) => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Node::Text(_) => {}
                Node::Eof => return Err(unexpected_eof(element)),
            }
        }
    }
}

/// Local (prefix-free) name of a start tag.
pub(crate) fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

/// Value of the attribute with local name `name`.
pub(crate) fn attribute(e: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == name.as_bytes() {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

pub(crate) fn unexpected_eof(element: &str) -> ClientError {
    ClientError::MalformedResponse(format!("document ended inside <{element}>"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_root_must_match() {
        let mut reader = FeedReader::uncancellable(&b"<?xml version=\"1.0\"?><foo/>"[..]);
        let err = reader.read_root(&["feed", "response"]).await.unwrap_err();
        assert!(matches!(err, ClientError::MalformedResponse(_)));
        assert!(err.to_string().contains("<foo>"));
    }

    #[tokio::test]
    async fn test_empty_document() {
        let mut reader = FeedReader::uncancellable(&b"   "[..]);
        let err = reader.read_root(&["feed"]).await.unwrap_err();
        assert!(matches!(err, ClientError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_read_text_unescapes() {
        let mut reader =
            FeedReader::uncancellable(&b"<response><sid>a &amp; b</sid></response>"[..]);
        reader.read_root(&["response"]).await.unwrap();
        match reader.next_significant().await.unwrap() {
            Node::Start(e) => assert_eq!(local_name(&e), "sid"),
            other => panic!("unexpected node {other:?}"),
        }
        assert_eq!(reader.read_text("sid").await.unwrap(), "a & b");
    }

    #[tokio::test]
    async fn test_prefixed_names_use_local_part() {
        let xml = br#"<feed xmlns:s="http://dev.splunk.com/ns/rest"><s:messages/></feed>"#;
        let mut reader = FeedReader::uncancellable(&xml[..]);
        let root = reader.read_root(&["feed"]).await.unwrap();
        assert_eq!(local_name(&root), "feed");
        match reader.next_significant().await.unwrap() {
            Node::Start(e) => assert_eq!(local_name(&e), "messages"),
            other => panic!("unexpected node {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_skip_nested_element() {
        let xml = b"<feed><x><y><z/></y></x><title>t</title></feed>";
        let mut reader = FeedReader::uncancellable(&xml[..]);
        reader.read_root(&["feed"]).await.unwrap();
        let _ = reader.next_significant().await.unwrap();
        reader.skip_element("x").await.unwrap();
        match reader.next_significant().await.unwrap() {
            Node::Start(e) => assert_eq!(local_name(&e), "title"),
            other => panic!("unexpected node {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_cancelled_token_stops_reading() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let mut reader = FeedReader::new(&b"<feed/>"[..], cancel);
        let err = reader.read_root(&["feed"]).await.unwrap_err();
        assert!(matches!(err, ClientError::Cancelled));
    }
}
