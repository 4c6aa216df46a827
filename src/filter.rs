//! Category and search selection, with natural ordering.
//!
//! Category checks look at the resolved kind first and fall back to the
//! path, so an item that the manifest mislabels (say, an `.mp4` listed under
//! `files` with `type: "other"`) still shows up on the movies page.

use crate::classify;
use crate::naming::natural_cmp;
use crate::types::{Category, MediaItem, MediaKind};

/// Free-text search taken from the page's `q` parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    pub fn new(text: &str) -> Self {
        Self {
            needle: text.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// Case-insensitive substring match on `"{title} {path}"`.
    pub fn matches(&self, item: &MediaItem) -> bool {
        self.needle.is_empty()
            || format!("{} {}", item.title, item.path)
                .to_lowercase()
                .contains(&self.needle)
    }
}

pub fn matches_category(item: &MediaItem, category: Category) -> bool {
    match category {
        Category::Movie => item.kind == MediaKind::Movie || classify::is_video(&item.path),
        Category::Show => {
            item.kind == MediaKind::Show || item.path.to_lowercase().contains("/shows/")
        }
        Category::Music => item.kind == MediaKind::Music || classify::is_audio(&item.path),
        Category::Image => item.kind == MediaKind::Image || classify::is_image(&item.path),
        Category::Book => item.kind == MediaKind::Book || classify::is_book(&item.path),
        Category::All => true,
    }
}

/// Items in `category` that match `query`, in input order.
pub fn filter_by_category<'a>(
    items: &'a [MediaItem],
    category: Category,
    query: &SearchQuery,
) -> Vec<&'a MediaItem> {
    items
        .iter()
        .filter(|item| matches_category(item, category) && query.matches(item))
        .collect()
}

/// Filter, then sort naturally by title. The sort is stable, so items with
/// equal titles keep manifest order.
pub fn select<'a>(
    items: &'a [MediaItem],
    category: Category,
    query: &SearchQuery,
) -> Vec<&'a MediaItem> {
    let mut selected = filter_by_category(items, category, query);
    selected.sort_by(|a, b| natural_cmp(&a.title, &b.title));
    selected
}
