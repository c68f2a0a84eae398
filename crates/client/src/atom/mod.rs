//! Atom feed parsing.
//!
//! # What this module handles:
//! - Streaming parse of `<feed>` and `<response>` documents
//! - `<messages>` blocks into [`Message`] values
//! - `<s:dict>` / `<s:list>` entry content into [`Value`]
//! - Paging metadata from root attributes and opensearch elements
//!
//! # What this module does NOT handle:
//! - Turning entries into typed entities (see [`crate::entity`])
//! - HTTP status handling (see [`crate::context`])

mod feed;
mod message;
mod reader;
mod value;

pub use feed::{AtomEntry, AtomFeed, Generator, Pagination};
pub use message::{Message, Severity};
pub use reader::FeedReader;
pub use value::Value;
