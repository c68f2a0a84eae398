//! Entry content values: `<s:dict>`, `<s:list>` and plain text.

use std::collections::BTreeMap;

use futures::future::BoxFuture;
use serde::Serialize;
use tokio::io::AsyncBufRead;

use crate::atom::reader::{FeedReader, Node, attribute, local_name, unexpected_eof};
use crate::error::{ClientError, Result};

/// A content value: a string, an ordered list, or a string-keyed dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    List(Vec<Value>),
    Dict(BTreeMap<String, Value>),
}

impl Default for Value {
    fn default() -> Self {
        Self::Dict(BTreeMap::new())
    }
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Dict(map) => Some(map),
            _ => None,
        }
    }

    /// Look up `key` when this value is a dictionary.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_dict().and_then(|map| map.get(key))
    }

    /// Convert to a JSON value so typed models can be deserialized with serde.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::from(self.clone())
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Text(s) => serde_json::Value::String(s),
            Value::List(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Dict(map) => serde_json::Value::Object(
                map.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}

/// Body of an element that holds one value: text, or a single nested
/// `<dict>` or `<list>`. The start tag has already been read.
pub(crate) fn read_value<'a, R>(
    reader: &'a mut FeedReader<R>,
    element: &'a str,
) -> BoxFuture<'a, Result<Value>>
where
    R: AsyncBufRead + Unpin + Send,
{
    Box::pin(async move {
        let mut text = String::new();
        let mut nested = None;
        loop {
            match reader.next().await? {
                Node::Text(t) => text.push_str(&t),
                Node::Start(e) => {
                    let name = local_name(&e);
                    if nested.is_some() {
                        return Err(ClientError::MalformedResponse(format!(
                            "more than one value inside <{element}>"
                        )));
                    }
                    nested = Some(match name.as_str() {
                        "dict" => Value::Dict(read_dict(reader).await?),
                        "list" => Value::List(read_list(reader).await?),
                        other => {
                            return Err(ClientError::MalformedResponse(format!(
                                "unexpected <{other}> inside <{element}>"
                            )));
                        }
                    });
                }
                Node::End(_) => break,
                Node::Eof => return Err(unexpected_eof(element)),
            }
        }
        match nested {
            Some(value) if text.trim().is_empty() => Ok(value),
            Some(_) => Err(ClientError::MalformedResponse(format!(
                "mixed text and structure inside <{element}>"
            ))),
            None => Ok(Value::Text(text)),
        }
    })
}

/// Children of a `<dict>` whose start tag was just read.
async fn read_dict<R>(reader: &mut FeedReader<R>) -> Result<BTreeMap<String, Value>>
where
    R: AsyncBufRead + Unpin + Send,
{
    let mut map = BTreeMap::new();
    loop {
        match reader.next_significant().await? {
            Node::Start(e) if local_name(&e) == "key" => {
                let name = attribute(&e, "name")?.ok_or_else(|| {
                    ClientError::MalformedResponse("<key> without a name attribute".to_string())
                })?;
                let value = read_value(reader, "key").await?;
                map.insert(name, value);
            }
            Node::Start(e) => {
                return Err(ClientError::MalformedResponse(format!(
                    "expected <key> inside <dict>, found <{}>",
                    local_name(&e)
                )));
            }
            Node::Text(t) => {
                return Err(ClientError::MalformedResponse(format!(
                    "unexpected text inside <dict>: '{}'",
                    t.trim()
                )));
            }
            Node::End(_) => return Ok(map),
            Node::Eof => return Err(unexpected_eof("dict")),
        }
    }
}

/// Children of a `<list>` whose start tag was just read.
async fn read_list<R>(reader: &mut FeedReader<R>) -> Result<Vec<Value>>
where
    R: AsyncBufRead + Unpin + Send,
{
    let mut items = Vec::new();
    loop {
        match reader.next_significant().await? {
            Node::Start(e) if local_name(&e) == "item" => {
                items.push(read_value(reader, "item").await?);
            }
            Node::Start(e) => {
                return Err(ClientError::MalformedResponse(format!(
                    "expected <item> inside <list>, found <{}>",
                    local_name(&e)
                )));
            }
            Node::Text(t) => {
                return Err(ClientError::MalformedResponse(format!(
                    "unexpected text inside <list>: '{}'",
                    t.trim()
                )));
            }
            Node::End(_) => return Ok(items),
            Node::Eof => return Err(unexpected_eof("list")),
        }
    }
}
