//! HTML generation.
//!
//! Renders item cards and rows, the inline error block, the debug panel, and
//! the standalone page document used by the command line.
//!
//! ## Thumbnails
//!
//! Every `<img>` is lazy-loaded and carries an `onerror` handler that swaps
//! in the placeholder image. The handler clears itself before swapping, so a
//! missing placeholder fails once instead of looping.
//!
//! Grid cards pick their thumbnail in this order:
//! 1. the item's `cover`
//! 2. the item's own path, on image pages or for image items
//! 3. a sibling `.jpg` next to the media file (`/movies/a.mp4` → `/movies/a.jpg`)
//!
//! List rows show only the cover, falling back to the placeholder.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! All interpolated manifest text is escaped.

use crate::config::{self, LibraryConfig};
use crate::naming::{file_name, sibling_cover};
use crate::page::{Container, ContainerContent, PageQuery, PageSink, StaticPage};
use crate::types::{Category, MediaItem, MediaKind, ViewMode};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Inline `onerror` handler that falls back to `placeholder` once.
pub fn fallback_handler(placeholder: &str) -> String {
    format!("this.onerror=null;this.src='{placeholder}';")
}

/// Thumbnail source for a grid card.
pub fn card_thumbnail(item: &MediaItem, category: Category) -> String {
    if let Some(cover) = &item.cover {
        cover.clone()
    } else if category == Category::Image || item.kind == MediaKind::Image {
        item.path.clone()
    } else {
        sibling_cover(&item.path)
    }
}

/// `"1 item"`, `"3 items"`.
pub fn count_label(count: usize) -> String {
    format!("{count} item{}", if count == 1 { "" } else { "s" })
}

/// Heading shown above a category page.
pub fn category_heading(category: Category) -> &'static str {
    match category {
        Category::Movie => "Movies",
        Category::Show => "Shows",
        Category::Music => "Music",
        Category::Image => "Images",
        Category::Book => "Books",
        Category::All => "All media",
    }
}

// ============================================================================
// Item Components
// ============================================================================

pub fn render_card(item: &MediaItem, category: Category, placeholder: &str) -> Markup {
    html! {
        a.card href=(item.path) title=(item.title) {
            img loading="lazy" src=(card_thumbnail(item, category)) onerror=(fallback_handler(placeholder)) alt="";
            div.title { (item.title) }
        }
    }
}

pub fn render_row(item: &MediaItem, placeholder: &str) -> Markup {
    let thumb = item.cover.as_deref().unwrap_or(placeholder);
    html! {
        a.row href=(item.path) title=(item.title) {
            img.thumb loading="lazy" src=(thumb) onerror=(fallback_handler(placeholder)) alt="";
            div.meta {
                div.label { (item.title) }
                div.sub { (file_name(&item.path)) }
            }
        }
    }
}

/// Concatenated cards or rows for a whole selection.
pub fn render_items(
    items: &[&MediaItem],
    category: Category,
    mode: ViewMode,
    placeholder: &str,
) -> Markup {
    html! {
        @for item in items {
            @match mode {
                ViewMode::Grid => { (render_card(item, category, placeholder)) }
                ViewMode::List => { (render_row(item, placeholder)) }
            }
        }
    }
}

pub fn error_block(message: &str) -> Markup {
    html! {
        div.error { (message) }
    }
}

/// Fixed-position diagnostic panel. Lines are kept by `white-space: pre-line`.
pub fn debug_panel(text: &str) -> Markup {
    html! {
        div.debug-panel {
            b { "Nomad Debug" }
            div id="ndg-status" { (text) }
        }
    }
}

// ============================================================================
// Page Document
// ============================================================================

fn container_body(page: &StaticPage) -> Markup {
    match &page.content {
        ContainerContent::Empty => html! {},
        ContainerContent::Items(markup) => markup.clone(),
        ContainerContent::Error(message) => error_block(message),
    }
}

/// Renders a complete page: header with search form and count, the item
/// container, and the debug panel when one was produced.
pub fn render_document(
    page: &StaticPage,
    config: &LibraryConfig,
    category: Category,
    query: &PageQuery,
) -> Markup {
    let heading = category_heading(category);
    let title = format!("{} · {}", config.render.page_title, heading);
    let css = format!(
        "{}\n\n{}",
        config::generate_color_css(&config.colors),
        CSS_STATIC
    );
    let target = page.container();

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                header.library-header {
                    h1 { (heading) }
                    form id="searchForm" method="get" role="search" {
                        input id="search" type="search" name="q" value=(query.search_text) placeholder="Search";
                        @if query.debug {
                            input type="hidden" name="debug" value="1";
                        }
                    }
                    span id="count" {
                        @if let Some(count) = page.count {
                            (count_label(count))
                        }
                    }
                }
                main {
                    @if page.has_grid {
                        div id="grid" class="grid" {
                            @if target == Some(Container::Grid) { (container_body(page)) }
                        }
                    }
                    @if page.has_list {
                        div id="list" class="list" {
                            @if target == Some(Container::List) { (container_body(page)) }
                        }
                    }
                }
                @if let Some(text) = &page.debug {
                    (debug_panel(text))
                }
            }
        }
    }
}
