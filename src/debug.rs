//! Diagnostic overlay, enabled by a `debug` query parameter.
//!
//! The probe does its own fetch and its own normalization, independent of
//! the main render, and reports the response status and per-category counts.
//! It never returns an error: any failure becomes an `ERR:` line in the
//! report.

use crate::fetch::{FetchError, ManifestSource};
use crate::filter::{SearchQuery, filter_by_category};
use crate::normalize::normalize_items;
use crate::types::Category;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebugReport {
    Loaded {
        label: String,
        status: String,
        items: usize,
        movies: usize,
        shows: usize,
        music: usize,
        images: usize,
    },
    Failed(String),
}

impl DebugReport {
    /// Panel text, one fact per line.
    pub fn text(&self) -> String {
        match self {
            DebugReport::Loaded {
                label,
                status,
                items,
                movies,
                shows,
                music,
                images,
            } => format!(
                "{label}: {status}\nitems: {items}\nmovies: {movies}\nshows: {shows}\nmusic: {music}\nimages: {images}"
            ),
            DebugReport::Failed(message) => format!("ERR: {message}"),
        }
    }
}

/// Fetch and count. The status line is reported as received; a non-2xx
/// body usually fails to parse and yields [`DebugReport::Failed`].
pub async fn probe<S: ManifestSource + ?Sized>(source: &S, query: &SearchQuery) -> DebugReport {
    match try_probe(source, query).await {
        Ok(report) => report,
        Err(err) => {
            warn!(%err, "debug probe failed");
            DebugReport::Failed(err.to_string())
        }
    }
}

async fn try_probe<S: ManifestSource + ?Sized>(
    source: &S,
    query: &SearchQuery,
) -> Result<DebugReport, FetchError> {
    let raw = source.fetch_raw().await?;
    let manifest: serde_json::Value = serde_json::from_slice(&raw.body)?;
    let items = normalize_items(&manifest);
    let count = |category| filter_by_category(&items, category, query).len();
    Ok(DebugReport::Loaded {
        label: source.label(),
        status: raw.status_line(),
        items: items.len(),
        movies: count(Category::Movie),
        shows: count(Category::Show),
        music: count(Category::Music),
        images: count(Category::Image),
    })
}
