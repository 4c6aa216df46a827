//! # Nomad Library
//!
//! Renders browsable media library pages from a JSON catalog manifest.
//!
//! The manifest has no schema. It can be any nesting of objects and arrays;
//! every node that carries a `path`, `file`, or `url` is a media item. The
//! library flattens that tree, works out what each item is (movie, show,
//! music, image, book), and renders a grid or list page for one category.
//!
//! # Pipeline
//!
//! ```text
//! 1. Fetch      GET /media.json?v=<ts>   →  serde_json::Value
//! 2. Normalize  Value                    →  Vec<MediaItem>   (deduplicated)
//! 3. Select     category + ?q=           →  Vec<&MediaItem>  (natural order)
//! 4. Render     items                    →  cards / rows     (maud)
//! 5. Inject     PageSink                 →  #grid | #list, #count
//! ```
//!
//! Nothing is cached between renders: the manifest is refetched and the
//! items rebuilt every time.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`fetch`] | Manifest sources: HTTP with cache busting, or a local file |
//! | [`normalize`] | Recursive manifest walk, media-reference decoding, dedup |
//! | [`classify`] | Type inference from explicit fields, key names, and paths |
//! | [`filter`] | Category and search selection |
//! | [`naming`] | Path, title, and natural-order helpers |
//! | [`generate`] | Maud templates: cards, rows, error block, debug panel, page |
//! | [`page`] | Page sink interface and the static page behind the CLI |
//! | [`library`] | `render_category`, the top-level render with error capture |
//! | [`debug`] | Independent diagnostic probe for `?debug` pages |
//! | [`config`] | `config.toml` loading over stock defaults |
//! | [`output`] | CLI text formatting |
//! | [`types`] | `MediaItem`, `MediaKind`, `Category`, `ViewMode` |

pub mod classify;
pub mod config;
pub mod debug;
pub mod fetch;
pub mod filter;
pub mod generate;
pub mod library;
pub mod naming;
pub mod normalize;
pub mod output;
pub mod page;
pub mod types;

pub use library::{RenderOptions, render_category};
pub use types::{Category, MediaItem, MediaKind, ViewMode};

#[cfg(test)]
pub(crate) mod test_helpers;
