//! Percent-encoding of REST path segments.
//!
//! Resource names (app names, stanza names, saved search names, job ids) are
//! user data and may contain characters with URL meaning. Each segment is
//! escaped on its own so a `/` inside a name never becomes a path separator.
//!
//! ```
//! use splunk_sdk::addressing::encode_path_segment;
//!
//! assert_eq!(encode_path_segment("user/name"), "user%2Fname");
//! ```

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, percent_encode};

use crate::error::{ClientError, Result};

/// Characters that must be percent-encoded in URL path segments.
///
/// RFC 3986 section 3.3 plus characters with special meaning in Splunk
/// paths. `%` is escaped so a literal percent survives a round trip and `/`
/// is escaped so a segment can never split in two.
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'~')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'+')
    .add(b',')
    .add(b';')
    .add(b'[')
    .add(b']');

/// Percent-encode a string for safe use as a single URL path segment.
///
/// ```
/// use splunk_sdk::addressing::encode_path_segment;
///
/// assert_eq!(encode_path_segment("simple"), "simple");
/// assert_eq!(encode_path_segment("user name"), "user%20name");
/// assert_eq!(encode_path_segment("user%test"), "user%25test");
/// ```
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}

/// Decode one escaped path segment.
///
/// # Errors
///
/// Returns [`ClientError::InvalidArgument`] when the escapes do not decode to
/// valid UTF-8.
pub fn decode_path_segment(segment: &str) -> Result<String> {
    percent_decode_str(segment)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|e| {
            ClientError::InvalidArgument(format!("path segment '{segment}' is not UTF-8: {e}"))
        })
}
