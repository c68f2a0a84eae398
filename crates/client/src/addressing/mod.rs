//! Resource addressing: names, namespaces, and segment escaping.
//!
//! # What this module handles:
//! - [`ResourceName`] composition and rendering
//! - [`Namespace`] prefixes (`services`, `servicesNS/{user}/{app}`)
//! - Percent-encoding of individual path segments
//!
//! # What this module does NOT handle:
//! - Joining a namespace and name onto a server URL (see [`crate::Context`])

mod namespace;
mod resource_name;
mod url_encoding;

pub use namespace::{Namespace, Scope, WILDCARD};
pub use resource_name::ResourceName;
pub use url_encoding::{PATH_SEGMENT_ENCODE_SET, decode_path_segment, encode_path_segment};
