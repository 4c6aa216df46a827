//! Shared test utilities for the nomad-library test suite.
//!
//! Provides fixture loading, lookup helpers, and bulk extractors over
//! normalized item lists.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let items = normalize_items(&load_fixture("catalog.json"));
//!
//! let item = find_item(&items, "Blade Runner");
//! assert_eq!(item.kind, MediaKind::Movie);
//! assert_eq!(titles(&items)[0], "Blade Runner");
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;

use crate::fetch::{FetchError, ManifestSource, RawResponse};
use crate::types::MediaItem;

// =========================================================================
// Fixtures
// =========================================================================

/// Parse a JSON manifest from `fixtures/`.
pub fn load_fixture(name: &str) -> Value {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read fixture {}: {e}", path.display()));
    serde_json::from_str(&content).unwrap()
}

// =========================================================================
// In-memory manifest source
// =========================================================================

/// Serves a fixed response, standing in for the manifest endpoint.
pub struct MemorySource {
    pub status: u16,
    pub body: String,
}

impl MemorySource {
    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: "not found".to_string(),
        }
    }
}

#[async_trait]
impl ManifestSource for MemorySource {
    fn label(&self) -> String {
        "media.json".to_string()
    }

    async fn fetch_raw(&self) -> Result<RawResponse, FetchError> {
        Ok(RawResponse {
            status: self.status,
            reason: None,
            body: self.body.clone().into_bytes(),
        })
    }
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find an item by title. Panics if not found.
pub fn find_item<'a>(items: &'a [MediaItem], title: &str) -> &'a MediaItem {
    items.iter().find(|i| i.title == title).unwrap_or_else(|| {
        let available: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        panic!("item '{title}' not found. Available: {available:?}")
    })
}

// =========================================================================
// Bulk extractors
// =========================================================================

pub fn titles(items: &[MediaItem]) -> Vec<&str> {
    items.iter().map(|i| i.title.as_str()).collect()
}

pub fn paths(items: &[MediaItem]) -> Vec<&str> {
    items.iter().map(|i| i.path.as_str()).collect()
}

/// Titles of a borrowed selection, as returned by the filter functions.
pub fn selected_titles<'a>(items: &[&'a MediaItem]) -> Vec<&'a str> {
    items.iter().map(|i| i.title.as_str()).collect()
}
