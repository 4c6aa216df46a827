//! Render a category page from the manifest.
//!
//! [`render_category`] is the single entry point: fetch, normalize, select,
//! render, inject. Failures anywhere along the way end up as one inline
//! error block in the page's container; nothing propagates past this
//! function. Markup is fully built before the sink is touched, so a page
//! never shows a half-rendered list.

use crate::fetch::{FetchError, ManifestSource};
use crate::filter;
use crate::generate;
use crate::normalize::normalize_items;
use crate::page::{PageQuery, PageSink};
use crate::types::{Category, ViewMode};
use tracing::{error, info};

/// Per-call render settings.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub mode: ViewMode,
    /// Root-relative fallback thumbnail.
    pub placeholder: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mode: ViewMode::Grid,
            placeholder: "/placeholder.jpg".to_string(),
        }
    }
}

/// Prefix of the inline error shown when a render fails.
pub const LOAD_FAILURE: &str = "Failed to load library";

/// Render `category` into `sink`. Errors are logged and shown inline.
pub async fn render_category<S, P>(
    source: &S,
    category: Category,
    options: &RenderOptions,
    query: &PageQuery,
    sink: &mut P,
) where
    S: ManifestSource + ?Sized,
    P: PageSink + ?Sized,
{
    if let Err(err) = try_render(source, category, options, query, sink).await {
        error!(%err, category = %category, "library render failed");
        if let Some(container) = sink.container() {
            sink.show_error(container, &format!("{LOAD_FAILURE}: {err}"));
        }
    }
}

async fn try_render<S, P>(
    source: &S,
    category: Category,
    options: &RenderOptions,
    query: &PageQuery,
    sink: &mut P,
) -> Result<(), FetchError>
where
    S: ManifestSource + ?Sized,
    P: PageSink + ?Sized,
{
    let manifest = source.fetch_manifest().await?;
    let items = normalize_items(&manifest);
    let selected = filter::select(&items, category, &query.search());
    let markup = generate::render_items(&selected, category, options.mode, &options.placeholder);

    sink.set_count(selected.len());
    let Some(container) = sink.container() else {
        return Ok(());
    };
    sink.render_items(container, markup);
    info!(
        category = %category,
        total = items.len(),
        shown = selected.len(),
        container = container.id(),
        "rendered library"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Container, ContainerContent, StaticPage};
    use crate::test_helpers::*;

    async fn render(source: &MemorySource, category: Category, query: &str) -> StaticPage {
        let mut page = StaticPage::with_container(Container::Grid);
        render_category(
            source,
            category,
            &RenderOptions::default(),
            &PageQuery::parse(query),
            &mut page,
        )
        .await;
        page
    }

    fn items_html(page: &StaticPage) -> String {
        match &page.content {
            ContainerContent::Items(markup) => markup.clone().into_string(),
            other => panic!("expected items, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn renders_movies_in_natural_order() {
        let source = MemorySource::json(
            r#"{"movies":[{"path":"b.mp4"},{"path":"a2.mp4"},{"path":"a10.mp4"}]}"#,
        );
        let page = render(&source, Category::Movie, "").await;
        assert_eq!(page.count, Some(3));
        let html = items_html(&page);
        let a2 = html.find(r#"href="/a2.mp4""#).unwrap();
        let a10 = html.find(r#"href="/a10.mp4""#).unwrap();
        let b = html.find(r#"href="/b.mp4""#).unwrap();
        assert!(a2 < a10 && a10 < b);
    }

    #[tokio::test]
    async fn search_narrows_the_list() {
        let source = MemorySource::json(
            r#"{"movies":[{"path":"b.mp4"},{"path":"a2.mp4"},{"path":"a10.mp4"}]}"#,
        );
        let page = render(&source, Category::Movie, "q=A1").await;
        assert_eq!(page.count, Some(1));
        assert!(items_html(&page).contains("/a10.mp4"));
    }

    #[tokio::test]
    async fn empty_manifest_renders_zero_items() {
        let page = render(&MemorySource::json("{}"), Category::All, "").await;
        assert_eq!(page.count, Some(0));
        assert!(page.error().is_none());
        assert_eq!(items_html(&page), "");
    }

    #[tokio::test]
    async fn http_failure_shows_inline_error_and_no_count() {
        let page = render(&MemorySource::status(404), Category::Movie, "").await;
        assert_eq!(page.count, None);
        let message = page.error().unwrap();
        assert!(message.starts_with("Failed to load library"));
        assert!(message.contains("404"));
    }

    #[tokio::test]
    async fn invalid_json_shows_inline_error() {
        let page = render(&MemorySource::json("{oops"), Category::Movie, "").await;
        assert_eq!(page.count, None);
        assert!(page.error().unwrap().contains("Invalid manifest JSON"));
    }

    #[tokio::test]
    async fn list_mode_renders_rows() {
        let source = MemorySource::json(r#"{"music":[{"path":"a.mp3"}]}"#);
        let mut page = StaticPage::with_container(Container::List);
        let options = RenderOptions {
            mode: ViewMode::List,
            ..RenderOptions::default()
        };
        render_category(&source, Category::Music, &options, &PageQuery::default(), &mut page).await;
        assert!(items_html(&page).contains(r#"class="row""#));
    }

    #[tokio::test]
    async fn missing_container_still_sets_count() {
        let source = MemorySource::json(r#"{"music":[{"path":"a.mp3"}]}"#);
        let mut page = StaticPage::bare();
        render_category(
            &source,
            Category::Music,
            &RenderOptions::default(),
            &PageQuery::default(),
            &mut page,
        )
        .await;
        assert_eq!(page.count, Some(1));
        assert!(matches!(page.content, ContainerContent::Empty));
    }

    #[tokio::test]
    async fn missing_container_swallows_errors() {
        let mut page = StaticPage::bare();
        render_category(
            &MemorySource::status(500),
            Category::Music,
            &RenderOptions::default(),
            &PageQuery::default(),
            &mut page,
        )
        .await;
        assert_eq!(page.count, None);
        assert!(matches!(page.content, ContainerContent::Empty));
    }
}
