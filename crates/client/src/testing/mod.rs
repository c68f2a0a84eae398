//! Testing utilities for Splunk SDK tests.
//!
//! Available when running tests or when the `test-utils` feature is enabled.
//!
//! # Example
//! ```ignore
//! use splunk_sdk::testing::load_fixture;
//!
//! let body = load_fixture("apps/list.xml");
//! ```

use std::path::Path;

/// Load an XML fixture from the fixtures directory.
///
/// # Arguments
/// * `fixture_path` - Relative path within the fixtures directory (e.g., "apps/list.xml")
///
/// # Panics
/// - If the fixture file cannot be read
pub fn load_fixture(fixture_path: &str) -> String {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let full_path = manifest_dir.join("fixtures").join(fixture_path);
    std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()))
}
