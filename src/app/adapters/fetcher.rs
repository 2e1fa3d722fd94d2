//! Result page fetchers
//!
//! Sources are either HTTP(S) URLs or local files (plain paths or `file://`
//! URLs). Fetchers make a single attempt; retries are left to the operator.

use crate::constants::{DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::{Error, Result};
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Retrieves the raw bytes of a result page
#[async_trait]
pub trait RaceFetcher: Send + Sync {
    async fn fetch(&self, source: &str) -> Result<Vec<u8>>;
}

/// Whether `source` names an HTTP(S) resource
pub fn is_remote(source: &str) -> bool {
    let lower = source.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Fetches pages over HTTP(S)
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            DEFAULT_USER_AGENT,
        )
    }
}

#[async_trait]
impl RaceFetcher for HttpFetcher {
    async fn fetch(&self, source: &str) -> Result<Vec<u8>> {
        debug!("GET {}", source);

        let response = self
            .client
            .get(source)
            .send()
            .await
            .map_err(|e| Error::fetch(source, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch(source, format!("HTTP status {}", status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::fetch(source, format!("Failed to read body: {}", e)))?;

        Ok(body.to_vec())
    }
}

/// Reads pages from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFetcher;

#[async_trait]
impl RaceFetcher for FileFetcher {
    async fn fetch(&self, source: &str) -> Result<Vec<u8>> {
        let path = Path::new(source.strip_prefix("file://").unwrap_or(source));
        debug!("Reading {}", path.display());

        tokio::fs::read(path)
            .await
            .map_err(|e| Error::fetch(source, e.to_string()))
    }
}

/// Dispatches to HTTP or file fetching by source shape
pub struct SourceFetcher {
    http: HttpFetcher,
    file: FileFetcher,
}

impl SourceFetcher {
    pub fn new(http: HttpFetcher) -> Self {
        Self {
            http,
            file: FileFetcher,
        }
    }
}

#[async_trait]
impl RaceFetcher for SourceFetcher {
    async fn fetch(&self, source: &str) -> Result<Vec<u8>> {
        if is_remote(source) {
            self.http.fetch(source).await
        } else {
            self.file.fetch(source).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_is_remote() {
        assert!(is_remote("http://www.nlaa.ca/results/2015/flat-out.html"));
        assert!(is_remote("HTTPS://example.org/r.htm"));
        assert!(!is_remote("results/flat-out.html"));
        assert!(!is_remote("file:///tmp/flat-out.html"));
    }

    #[tokio::test]
    async fn test_file_fetcher_reads_plain_and_file_urls() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"<pre>rows</pre>").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let plain = FileFetcher.fetch(&path).await.unwrap();
        let url = FileFetcher
            .fetch(&format!("file://{}", path))
            .await
            .unwrap();

        assert_eq!(plain, b"<pre>rows</pre>");
        assert_eq!(url, plain);
    }

    #[tokio::test]
    async fn test_missing_file_is_a_fetch_error() {
        let fetcher = SourceFetcher::new(HttpFetcher::with_defaults().unwrap());
        let result = fetcher.fetch("/definitely/not/here.html").await;

        assert!(matches!(result, Err(Error::Fetch { .. })));
        assert_eq!(result.unwrap_err().stage(), crate::ErrorStage::Fetch);
    }
}
