//! Atom feed documents and their entries.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use quick_xml::events::BytesStart;
use tokio::io::AsyncBufRead;

use crate::atom::message::{Message, read_messages_block};
use crate::atom::reader::{FeedReader, Node, attribute, local_name, unexpected_eof};
use crate::atom::value::{Value, read_value};
use crate::error::{ClientError, Result};

/// Paging window of a collection response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub offset: usize,
    pub items_per_page: usize,
    pub total_results: usize,
}

impl Pagination {
    /// Offset of the page after this one, or `None` once the walk is done.
    ///
    /// A page size of zero ends the walk.
    pub fn next_offset(&self) -> Option<usize> {
        if self.items_per_page == 0 {
            return None;
        }
        let next = self.offset.saturating_add(self.items_per_page);
        (next < self.total_results).then_some(next)
    }
}

#[derive(Debug, Default)]
struct PaginationFields {
    offset: Option<usize>,
    items_per_page: Option<usize>,
    total_results: Option<usize>,
}

impl PaginationFields {
    fn set(&mut self, key: &str, raw: &str) -> Result<bool> {
        let slot = match key {
            "offset" | "startIndex" => &mut self.offset,
            "itemsPerPage" => &mut self.items_per_page,
            "totalResults" => &mut self.total_results,
            _ => return Ok(false),
        };
        let parsed = raw.trim().parse::<usize>().map_err(|e| {
            ClientError::MalformedResponse(format!("invalid {key} value '{raw}': {e}"))
        })?;
        *slot = Some(parsed);
        Ok(true)
    }

    fn from_root(root: &BytesStart<'_>) -> Result<Self> {
        let mut fields = Self::default();
        for attr in root.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr.unescape_value()?;
            fields.set(&key, &value)?;
        }
        Ok(fields)
    }

    /// Fields the server left out describe a single page holding every
    /// returned entry.
    fn finish(self, entries: usize) -> Pagination {
        Pagination {
            offset: self.offset.unwrap_or(0),
            items_per_page: self.items_per_page.unwrap_or(entries),
            total_results: self.total_results.unwrap_or(entries),
        }
    }
}

/// The `<generator>` element: which server build produced the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generator {
    pub build: Option<String>,
    pub version: Option<String>,
}

/// One `<entry>` of a feed.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomEntry {
    pub title: String,
    pub id: Option<String>,
    pub author: Option<String>,
    pub updated: Option<DateTime<FixedOffset>>,
    pub published: Option<DateTime<FixedOffset>>,
    /// `rel` to `href`.
    pub links: BTreeMap<String, String>,
    pub content: Value,
}

impl AtomEntry {
    async fn read<R>(reader: &mut FeedReader<R>) -> Result<Self>
    where
        R: AsyncBufRead + Unpin + Send,
    {
        let mut title = None;
        let mut id = None;
        let mut author = None;
        let mut updated = None;
        let mut published = None;
        let mut links = BTreeMap::new();
        let mut content = None;

        loop {
            match reader.next_significant().await? {
                Node::Start(e) => match local_name(&e).as_str() {
                    "title" => title = Some(reader.read_text("title").await?),
                    "id" => id = Some(reader.read_text("id").await?),
                    "author" => author = read_author(reader).await?,
                    "updated" => updated = Some(parse_date(&reader.read_text("updated").await?)?),
                    "published" => {
                        published = Some(parse_date(&reader.read_text("published").await?)?)
                    }
                    "link" => {
                        insert_link(&mut links, &e)?;
                        reader.skip_element("link").await?;
                    }
                    "content" => content = Some(read_content(reader, &e).await?),
                    other => reader.skip_element(other).await?,
                },
                Node::Text(t) => {
                    return Err(ClientError::MalformedResponse(format!(
                        "unexpected text inside <entry>: '{}'",
                        t.trim()
                    )));
                }
                Node::End(_) => break,
                Node::Eof => return Err(unexpected_eof("entry")),
            }
        }

        let title = title
            .ok_or_else(|| ClientError::MalformedResponse("<entry> without <title>".to_string()))?;
        Ok(Self {
            title,
            id,
            author,
            updated,
            published,
            links,
            content: content.unwrap_or_default(),
        })
    }
}

/// A parsed `<feed>` or `<response>` document.
///
/// Splunk answers collection reads with an Atom `<feed>` and most actions
/// with a bare `<response>`. Both may carry messages; a `<response>` also
/// carries simple named values such as a job's `sid` or a login's
/// `sessionKey`, kept in [`response_values`](Self::response_values).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomFeed {
    pub title: Option<String>,
    pub id: Option<String>,
    pub updated: Option<DateTime<FixedOffset>>,
    pub author: Option<String>,
    pub generator: Option<Generator>,
    pub links: BTreeMap<String, String>,
    pub messages: Vec<Message>,
    pub pagination: Pagination,
    pub entries: Vec<AtomEntry>,
    pub response_values: BTreeMap<String, String>,
}

impl AtomFeed {
    /// Parse a whole document.
    ///
    /// Unknown feed-level elements are skipped; unknown elements inside a
    /// `<messages>`, `<dict>` or `<list>` block are errors.
    ///
    /// # Errors
    ///
    /// [`ClientError::MalformedResponse`] when the document does not match
    /// the grammar, [`ClientError::Transport`] when the stream fails and
    /// [`ClientError::Cancelled`] when the reader's token fires.
    pub async fn read_xml<R>(reader: &mut FeedReader<R>) -> Result<Self>
    where
        R: AsyncBufRead + Unpin + Send,
    {
        let root = reader.read_root(&["feed", "response"]).await?;
        let mut fields = PaginationFields::from_root(&root)?;
        let mut feed = Self::default();

        if local_name(&root) == "feed" {
            feed.read_feed_children(reader, &mut fields).await?;
        } else {
            feed.read_response_children(reader).await?;
        }

        feed.pagination = fields.finish(feed.entries.len());
        Ok(feed)
    }

    async fn read_feed_children<R>(
        &mut self,
        reader: &mut FeedReader<R>,
        fields: &mut PaginationFields,
    ) -> Result<()>
    where
        R: AsyncBufRead + Unpin + Send,
    {
        loop {
            match reader.next_significant().await? {
                Node::Start(e) => {
                    let name = local_name(&e);
                    match name.as_str() {
                        "title" => self.title = Some(reader.read_text("title").await?),
                        "id" => self.id = Some(reader.read_text("id").await?),
                        "updated" => {
                            self.updated = Some(parse_date(&reader.read_text("updated").await?)?)
                        }
                        "author" => self.author = read_author(reader).await?,
                        "generator" => {
                            self.generator = Some(Generator {
                                build: attribute(&e, "build")?,
                                version: attribute(&e, "version")?,
                            });
                            reader.skip_element("generator").await?;
                        }
                        "link" => {
                            insert_link(&mut self.links, &e)?;
                            reader.skip_element("link").await?;
                        }
                        "messages" => self.messages.extend(read_messages_block(reader).await?),
                        "entry" => self.entries.push(AtomEntry::read(reader).await?),
                        "totalResults" | "itemsPerPage" | "startIndex" => {
                            let raw = reader.read_text(&name).await?;
                            fields.set(&name, &raw)?;
                        }
                        other => reader.skip_element(other).await?,
                    }
                }
                Node::Text(t) => {
                    return Err(ClientError::MalformedResponse(format!(
                        "unexpected text inside <feed>: '{}'",
                        t.trim()
                    )));
                }
                Node::End(_) => return Ok(()),
                Node::Eof => return Err(unexpected_eof("feed")),
            }
        }
    }

    async fn read_response_children<R>(&mut self, reader: &mut FeedReader<R>) -> Result<()>
    where
        R: AsyncBufRead + Unpin + Send,
    {
        loop {
            match reader.next_significant().await? {
                Node::Start(e) => {
                    let name = local_name(&e);
                    if name == "messages" {
                        self.messages.extend(read_messages_block(reader).await?);
                    } else if let Value::Text(text) = read_value(reader, &name).await? {
                        self.response_values.insert(name, text);
                    }
                }
                Node::Text(_) => {}
                Node::End(_) => return Ok(()),
                Node::Eof => return Err(unexpected_eof("response")),
            }
        }
    }

    /// A simple value from a `<response>` document.
    pub fn response_value(&self, key: &str) -> Option<&str> {
        self.response_values.get(key).map(String::as_str)
    }
}

/// `<author><name>...</name></author>`; other children are ignored.
async fn read_author<R>(reader: &mut FeedReader<R>) -> Result<Option<String>>
where
    R: AsyncBufRead + Unpin + Send,
{
    let mut name = None;
    loop {
        match reader.next_significant().await? {
            Node::Start(e) if local_name(&e) == "name" => {
                name = Some(reader.read_text("name").await?);
            }
            Node::Start(e) => reader.skip_element(&local_name(&e)).await?,
            Node::Text(_) => {}
            Node::End(_) => return Ok(name),
            Node::Eof => return Err(unexpected_eof("author")),
        }
    }
}

async fn read_content<R>(reader: &mut FeedReader<R>, start: &BytesStart<'_>) -> Result<Value>
where
    R: AsyncBufRead + Unpin + Send,
{
    let kind = attribute(start, "type")?;
    let value = read_value(reader, "content").await?;
    let is_xml = kind.as_deref().is_some_and(|k| k.starts_with("text/xml"));
    Ok(match value {
        Value::Text(t) if is_xml && t.trim().is_empty() => Value::default(),
        other => other,
    })
}

fn insert_link(links: &mut BTreeMap<String, String>, e: &BytesStart<'_>) -> Result<()> {
    if let Some(href) = attribute(e, "href")? {
        let rel = attribute(e, "rel")?.unwrap_or_else(|| "alternate".to_string());
        links.insert(rel, href);
    }
    Ok(())
}

fn parse_date(raw: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map_err(|e| ClientError::MalformedResponse(format!("invalid date '{raw}': {e}")))
}
