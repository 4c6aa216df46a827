//! End-to-end renders against a local manifest server.
//!
//! Each test starts an axum server on an ephemeral port that serves a fixed
//! `/media.json`, then drives the HTTP source through the public API.

use axum::Router;
use axum::extract::RawQuery;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use nomad_library::config::{LibraryConfig, SourceConfig};
use nomad_library::debug::{self, DebugReport};
use nomad_library::fetch::{HttpSource, ManifestSource};
use nomad_library::filter::SearchQuery;
use nomad_library::generate::render_document;
use nomad_library::page::{Container, PageQuery, StaticPage};
use nomad_library::{Category, RenderOptions, render_category};
use std::sync::{Arc, Mutex};

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

async fn serve(app: Router) -> SourceConfig {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    SourceConfig {
        base_url: format!("http://{addr}/"),
        ..SourceConfig::default()
    }
}

async fn serve_manifest(status: StatusCode, body: &'static str) -> HttpSource {
    let app = Router::new().route("/media.json", get(move || async move { (status, body) }));
    HttpSource::new(&serve(app).await).unwrap()
}

async fn render(source: &HttpSource, category: Category, query: &str) -> StaticPage {
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

const MOVIES: &str = r#"{"movies":[{"path":"b.mp4"},{"path":"a2.mp4"},{"path":"a10.mp4"}]}"#;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn movies_render_in_natural_order() {
    let source = serve_manifest(StatusCode::OK, MOVIES).await;
    let page = render(&source, Category::Movie, "").await;
    assert_eq!(page.count, Some(3));

    let html = render_document(
        &page,
        &LibraryConfig::default(),
        Category::Movie,
        &PageQuery::default(),
    )
    .into_string();
    assert!(html.contains("3 items"));
    let a2 = html.find(r#"href="/a2.mp4""#).unwrap();
    let a10 = html.find(r#"href="/a10.mp4""#).unwrap();
    let b = html.find(r#"href="/b.mp4""#).unwrap();
    assert!(a2 < a10 && a10 < b, "unexpected order in {html}");
}

#[tokio::test]
async fn episodes_list_as_shows() {
    let source = serve_manifest(
        StatusCode::OK,
        r#"{"series":{"episodes":[{"file":"s01e02.mkv"},{"file":"s01e01.mkv"}]}}"#,
    )
    .await;
    let page = render(&source, Category::Show, "").await;
    assert_eq!(page.count, Some(2));
    assert!(page.error().is_none());
}

#[tokio::test]
async fn empty_manifest_shows_zero_items() {
    let source = serve_manifest(StatusCode::OK, "{}").await;
    let page = render(&source, Category::All, "").await;
    assert_eq!(page.count, Some(0));
    assert!(page.error().is_none());
}

#[tokio::test]
async fn missing_manifest_shows_inline_error() {
    let source = serve_manifest(StatusCode::NOT_FOUND, "no such file").await;
    let page = render(&source, Category::Movie, "").await;
    assert_eq!(page.count, None);
    let message = page.error().expect("expected an inline error");
    assert!(message.contains("Failed to load library"), "{message}");
    assert!(message.contains("404"), "{message}");
}

#[tokio::test]
async fn requests_bypass_caches() {
    let seen: Arc<Mutex<Vec<(Option<String>, HeaderMap)>>> = Arc::default();
    let record = seen.clone();
    let app = Router::new().route(
        "/media.json",
        get(move |RawQuery(query): RawQuery, headers: HeaderMap| {
            let record = record.clone();
            async move {
                record.lock().unwrap().push((query, headers));
                "{}"
            }
        }),
    );
    let source = HttpSource::new(&serve(app).await).unwrap();
    source.fetch_manifest().await.unwrap();
    source.fetch_manifest().await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    let versions: Vec<&str> = seen
        .iter()
        .map(|(query, _)| query.as_deref().unwrap().strip_prefix("v=").unwrap())
        .collect();
    assert_ne!(versions[0], versions[1]);
    for (_, headers) in seen.iter() {
        assert_eq!(headers["cache-control"], "no-store");
        assert_eq!(headers["pragma"], "no-cache");
    }
}

#[tokio::test]
async fn debug_probe_reports_status_and_counts() {
    let source = serve_manifest(StatusCode::OK, MOVIES).await;
    let report = debug::probe(&source, &SearchQuery::default()).await;
    assert_eq!(
        report,
        DebugReport::Loaded {
            label: "media.json".to_string(),
            status: "200 OK".to_string(),
            items: 3,
            movies: 3,
            shows: 0,
            music: 0,
            images: 0,
        }
    );
}

#[tokio::test]
async fn debug_probe_reports_failures() {
    let source = serve_manifest(StatusCode::INTERNAL_SERVER_ERROR, "boom").await;
    let report = debug::probe(&source, &SearchQuery::default()).await;
    assert!(matches!(report, DebugReport::Failed(_)));
    assert!(report.text().starts_with("ERR: "));
}
