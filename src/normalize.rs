//! Manifest flattening.
//!
//! The manifest has no fixed schema: a catalog might be
//! `{"movies": [...], "shows": {"episodes": [...]}}`, a bare array, or
//! something nested several levels deep. [`normalize_items`] walks the whole
//! tree and emits every node that decodes as a media reference (a node
//! carrying `path`, `file`, or `url`).
//!
//! ## Context Hints
//!
//! Property names along the way hint at the type of what they hold
//! (`movies`, `songs`, `gallery`, ...; see [`classify::key_hint`]). The
//! innermost hint wins. Arrays directly under an `episodes` key are always
//! shows. An explicit `type` on the node overrides any hint.
//!
//! ## Deduplication
//!
//! Paths are compared case-insensitively after absolutizing; the first node
//! discovered keeps its place and later duplicates are dropped.

use crate::classify;
use crate::naming::{ensure_absolute, title_from_path};
use crate::types::{MediaItem, MediaKind};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::debug;

/// Fields that [`MediaItem`] carries itself. Everything else, including the
/// alternate reference and title fields, is kept untouched in
/// [`MediaItem::extra`].
const CONSUMED_FIELDS: &[&str] = &["path", "title", "cover", "type"];

/// Strict decode shape of a node that references a media file.
#[derive(Debug, Default, Deserialize)]
struct MediaRef {
    #[serde(default, deserialize_with = "text")]
    path: Option<String>,
    #[serde(default, deserialize_with = "text")]
    file: Option<String>,
    #[serde(default, deserialize_with = "text")]
    url: Option<String>,
    #[serde(default, deserialize_with = "text")]
    title: Option<String>,
    #[serde(default, deserialize_with = "text")]
    name: Option<String>,
    #[serde(default, deserialize_with = "text")]
    cover: Option<String>,
    #[serde(default, deserialize_with = "text")]
    thumbnail: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "text")]
    kind: Option<String>,
}

/// Scalars read as text; empty strings, null, and containers read as absent.
fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    })
}

impl MediaRef {
    /// Decode a node. `None` means the node is only a container.
    fn decode(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        let media = MediaRef::deserialize(value).ok()?;
        media.reference().is_some().then_some(media)
    }

    fn reference(&self) -> Option<&str> {
        self.path
            .as_deref()
            .or(self.file.as_deref())
            .or(self.url.as_deref())
    }

    fn into_item(self, node: &Map<String, Value>, hint: Option<MediaKind>) -> Option<MediaItem> {
        let raw = self.reference()?.to_string();
        let path = ensure_absolute(&raw);
        let title = self
            .title
            .or(self.name)
            .unwrap_or_else(|| title_from_path(&raw));
        let cover = self.cover.or(self.thumbnail).map(|c| ensure_absolute(&c));
        let kind = match self.kind {
            Some(explicit) => MediaKind::from_explicit(&explicit),
            None => hint.unwrap_or_else(|| classify::guess_kind(&path)),
        };
        let extra = node
            .iter()
            .filter(|(k, _)| !CONSUMED_FIELDS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Some(MediaItem {
            path,
            title,
            cover,
            kind,
            extra,
        })
    }
}

struct Walker {
    items: Vec<MediaItem>,
}

impl Walker {
    fn emit(&mut self, node: &Map<String, Value>, media: MediaRef, hint: Option<MediaKind>) {
        if let Some(item) = media.into_item(node, hint) {
            self.items.push(item);
        }
    }

    fn walk(&mut self, node: &Value, hint: Option<MediaKind>, parent_key: Option<&str>) {
        match node {
            Value::Object(map) => {
                if let Some(media) = MediaRef::decode(node) {
                    self.emit(map, media, hint);
                }
                self.walk_properties(map);
            }
            Value::Array(elements) => {
                let element_hint = match parent_key {
                    Some(key) if classify::is_episodes_key(key) => Some(MediaKind::Show),
                    _ => hint,
                };
                for element in elements {
                    match (element, MediaRef::decode(element)) {
                        (Value::Object(map), Some(media)) => {
                            self.emit(map, media, element_hint);
                            self.walk_properties(map);
                        }
                        _ => self.walk(element, hint, parent_key),
                    }
                }
            }
            _ => {}
        }
    }

    fn walk_properties(&mut self, map: &Map<String, Value>) {
        for (key, child) in map {
            self.walk(child, classify::key_hint(key), Some(key));
        }
    }
}

/// Flatten a manifest into a deduplicated list of media items, in the order
/// they were first discovered.
pub fn normalize_items(manifest: &Value) -> Vec<MediaItem> {
    let mut walker = Walker { items: Vec::new() };
    walker.walk(manifest, None, None);

    let found = walker.items.len();
    let mut seen = HashSet::new();
    let items: Vec<MediaItem> = walker
        .items
        .into_iter()
        .filter(|item| !item.path.is_empty() && seen.insert(item.path.to_lowercase()))
        .collect();
    debug!(found, kept = items.len(), "normalized manifest");
    items
}
