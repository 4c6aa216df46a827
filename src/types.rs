//! Shared types used across the pipeline.
//!
//! [`MediaItem`] is the only thing the normalizer produces and the only thing
//! the filter and renderer consume. Items are rebuilt from the manifest on
//! every render and never mutated afterwards.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Resolved type of a media item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Show,
    Music,
    Image,
    Book,
    Other,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Show => "show",
            MediaKind::Music => "music",
            MediaKind::Image => "image",
            MediaKind::Book => "book",
            MediaKind::Other => "other",
        }
    }

    /// Map an explicit `type` field from the manifest. Matching is
    /// case-insensitive; unrecognised values become [`MediaKind::Other`].
    pub fn from_explicit(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "movie" => MediaKind::Movie,
            "show" => MediaKind::Show,
            "music" => MediaKind::Music,
            "image" => MediaKind::Image,
            "book" => MediaKind::Book,
            _ => MediaKind::Other,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One playable or viewable asset, flattened out of the manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaItem {
    /// Absolute path: leading slash or scheme-qualified. Unique per set
    /// under case-insensitive comparison.
    pub path: String,
    /// Display title, never empty.
    pub title: String,
    /// Absolutized cover image, if the manifest named one.
    pub cover: Option<String>,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// Every other field of the original manifest node.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Category a page lists. Anything unrecognised lists everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    Movie,
    Show,
    Music,
    Image,
    Book,
    #[default]
    All,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Movie => "movie",
            Category::Show => "show",
            Category::Music => "music",
            Category::Image => "image",
            Category::Book => "book",
            Category::All => "all",
        }
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "movie" => Category::Movie,
            "show" => Category::Show,
            "music" => Category::Music,
            "image" => Category::Image,
            "book" => Category::Book,
            _ => Category::All,
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a page lays out its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}
