//! Manifest retrieval.
//!
//! The catalog is refetched in full on every render. [`HttpSource`] asks the
//! server for `<base_url>/media.json?v=<timestamp>` with caching disabled on
//! both ends: the `v` value changes on every request and the request carries
//! `Cache-Control: no-store`. There is no retry and no timeout override; a
//! failed request goes straight to the caller's error path.
//!
//! [`FileSource`] reads the same document from disk, for offline rendering.

use crate::config::SourceConfig;
use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to load {resource} ({status})")]
    Load { resource: String, status: u16 },
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Invalid manifest JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid manifest URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Undecoded response: status plus body bytes.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub reason: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `"200 OK"`, `"404 Not Found"`, or just the code when there is no
    /// reason phrase.
    pub fn status_line(&self) -> String {
        match &self.reason {
            Some(reason) => format!("{} {}", self.status, reason),
            None => self.status.to_string(),
        }
    }
}

#[async_trait]
pub trait ManifestSource: Send + Sync {
    /// Short name used in messages, e.g. `media.json`.
    fn label(&self) -> String;

    /// Perform the request without interpreting the status.
    async fn fetch_raw(&self) -> Result<RawResponse, FetchError>;

    /// Fetch and decode. A non-2xx status is a [`FetchError::Load`].
    async fn fetch_manifest(&self) -> Result<Value, FetchError> {
        let raw = self.fetch_raw().await?;
        if !raw.is_success() {
            return Err(FetchError::Load {
                resource: self.label(),
                status: raw.status,
            });
        }
        Ok(serde_json::from_slice(&raw.body)?)
    }
}

/// Millisecond timestamp, strictly increasing within the process.
fn cache_buster() -> u64 {
    static LAST: AtomicU64 = AtomicU64::new(0);
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut prev = LAST.load(Ordering::Relaxed);
    loop {
        let next = now.max(prev + 1);
        match LAST.compare_exchange_weak(prev, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(actual) => prev = actual,
        }
    }
}

/// Manifest served over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpSource {
    pub fn new(config: &SourceConfig) -> Result<Self, FetchError> {
        let endpoint = Url::parse(&config.base_url)?.join(&config.manifest_path)?;
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client, endpoint })
    }

    /// Endpoint with a fresh `v` cache-busting parameter.
    pub fn manifest_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("v", &cache_buster().to_string());
        url
    }
}

#[async_trait]
impl ManifestSource for HttpSource {
    fn label(&self) -> String {
        self.endpoint
            .path_segments()
            .and_then(|mut s| s.next_back())
            .filter(|s| !s.is_empty())
            .unwrap_or("manifest")
            .to_string()
    }

    async fn fetch_raw(&self) -> Result<RawResponse, FetchError> {
        let url = self.manifest_url();
        debug!(%url, "fetching manifest");
        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        debug!(status = status.as_u16(), bytes = body.len(), "manifest response");
        Ok(RawResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().map(str::to_string),
            body,
        })
    }
}

/// Manifest read from a local file. Always reports `200 OK` once read.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ManifestSource for FileSource {
    fn label(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    async fn fetch_raw(&self) -> Result<RawResponse, FetchError> {
        debug!(path = %self.path.display(), "reading manifest");
        let body = tokio::fs::read(&self.path).await?;
        Ok(RawResponse {
            status: 200,
            reason: Some("OK".to_string()),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LibraryConfig;
    use tempfile::TempDir;

    fn http_source() -> HttpSource {
        let mut config = LibraryConfig::default().source;
        config.base_url = "http://nomad.local/library/".to_string();
        HttpSource::new(&config).unwrap()
    }

    #[test]
    fn manifest_url_is_root_relative_with_version() {
        let url = http_source().manifest_url();
        assert_eq!(url.path(), "/media.json");
        let (key, value) = url.query_pairs().next().unwrap();
        assert_eq!(key, "v");
        assert!(value.parse::<u64>().is_ok());
    }

    #[test]
    fn cache_buster_strictly_increases() {
        let source = http_source();
        let v = |u: Url| u.query_pairs().next().unwrap().1.parse::<u64>().unwrap();
        let a = v(source.manifest_url());
        let b = v(source.manifest_url());
        let c = v(source.manifest_url());
        assert!(a < b && b < c);
    }

    #[test]
    fn http_label_is_file_name() {
        assert_eq!(http_source().label(), "media.json");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let mut config = LibraryConfig::default().source;
        config.base_url = "not a url".to_string();
        assert!(matches!(HttpSource::new(&config), Err(FetchError::Url(_))));
    }

    #[test]
    fn status_line_formats() {
        let ok = RawResponse {
            status: 200,
            reason: Some("OK".to_string()),
            body: vec![],
        };
        assert!(ok.is_success());
        assert_eq!(ok.status_line(), "200 OK");
        let odd = RawResponse {
            status: 599,
            reason: None,
            body: vec![],
        };
        assert!(!odd.is_success());
        assert_eq!(odd.status_line(), "599");
    }

    #[test]
    fn load_error_names_resource_and_status() {
        let err = FetchError::Load {
            resource: "media.json".to_string(),
            status: 404,
        };
        assert_eq!(err.to_string(), "Failed to load media.json (404)");
    }

    #[tokio::test]
    async fn file_source_reads_manifest() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("media.json");
        std::fs::write(&path, r#"{"movies": []}"#).unwrap();
        let source = FileSource::new(&path);
        assert_eq!(source.label(), "media.json");
        let value = source.fetch_manifest().await.unwrap();
        assert!(value["movies"].is_array());
    }

    #[tokio::test]
    async fn file_source_invalid_json_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("media.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = FileSource::new(&path).fetch_manifest().await.unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[tokio::test]
    async fn file_source_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = FileSource::new(tmp.path().join("absent.json"))
            .fetch_raw()
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Io(_)));
    }
}
