//! Hierarchical names of REST resources.

use std::fmt;
use std::ops::Index;

use crate::addressing::url_encoding::{decode_path_segment, encode_path_segment};
use crate::error::Result;

/// An ordered, immutable sequence of path segments naming a REST resource.
///
/// Equality, hashing and ordering are structural over the segments. The
/// [`Display`](fmt::Display) form is the `/`-joined path with every segment
/// percent-encoded on its own, so `ResourceName::new(["a/b"])` renders as
/// `a%2Fb`, never as two segments.
///
/// ```
/// use splunk_sdk::ResourceName;
///
/// let apps = ResourceName::new(["apps", "local"]);
/// let app = apps.join(["my app"]);
/// assert_eq!(app.to_string(), "apps/local/my%20app");
/// assert_eq!(app.title(), Some("my app"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceName {
    segments: Vec<String>,
}

impl ResourceName {
    /// Build a name from its segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// A name with no segments. Renders as the empty path.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A new name made of this name followed by `extra`.
    pub fn join<I, S>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut segments = self.segments.clone();
        segments.extend(extra.into_iter().map(Into::into));
        Self { segments }
    }

    /// Parse an escaped path produced by [`to_string`](ToString::to_string).
    ///
    /// The empty string parses to the empty name.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`](crate::ClientError::InvalidArgument)
    /// when a segment does not decode to UTF-8.
    pub fn parse(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Ok(Self::empty());
        }
        let segments = path
            .split('/')
            .map(decode_path_segment)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { segments })
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True when the name has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segment at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(String::as_str)
    }

    /// All segments in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Iterate over the unescaped segments.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// The last segment: the resource's own name.
    pub fn title(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// The second-to-last segment: the collection the resource lives in.
    pub fn collection(&self) -> Option<&str> {
        self.segments
            .len()
            .checked_sub(2)
            .and_then(|i| self.get(i))
    }

    /// The name without its last segment.
    pub fn parent(&self) -> Option<Self> {
        self.segments.split_last().map(|(_, rest)| Self {
            segments: rest.to_vec(),
        })
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            f.write_str(&encode_path_segment(segment))?;
        }
        Ok(())
    }
}

impl Index<usize> for ResourceName {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.segments[index]
    }
}

impl<'a> IntoIterator for &'a ResourceName {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for ResourceName {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
