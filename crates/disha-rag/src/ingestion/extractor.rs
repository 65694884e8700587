//! Text extraction from document sources
//!
//! The pipeline only depends on the [`TextExtractor`] trait; the default
//! implementation handles local PDF/plain-text files and remote URLs.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::types::Source;

/// Extraction service interface
///
/// Returns the document's full extracted text, pages concatenated with
/// blank-line separators. Failure is an extraction error, never partial
/// silent text.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, source: &Source) -> Result<String>;
}

/// Default extractor: PDFs via `pdf-extract`, anything else read as UTF-8
/// text; URLs fetched over HTTP first.
pub struct DocumentExtractor {
    client: reqwest::Client,
}

impl DocumentExtractor {
    pub fn new(timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("failed to build HTTP client");
        Self { client }
    }

    async fn fetch_url(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::extraction(url, format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::extraction(
                url,
                format!("HTTP {}", response.status()),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::extraction(url, format!("read failed: {}", e)))?;
        Ok(bytes.to_vec())
    }

    /// Decode document bytes into text.
    ///
    /// PDF parsing is CPU-bound, so it runs on the blocking pool.
    async fn decode(&self, source: &Source, bytes: Vec<u8>) -> Result<String> {
        if looks_like_pdf(&bytes) {
            let desc = source.to_string();
            tokio::task::spawn_blocking(move || {
                pdf_extract::extract_text_from_mem(&bytes)
                    .map_err(|e| Error::extraction(&desc, e.to_string()))
            })
            .await
            .map_err(|e| Error::extraction(source.to_string(), format!("task failed: {}", e)))?
        } else {
            String::from_utf8(bytes)
                .map_err(|_| Error::extraction(source.to_string(), "not valid UTF-8 text"))
        }
    }
}

/// PDF magic bytes check; extension alone is unreliable for fetched URLs.
fn looks_like_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(b"%PDF")
}

#[async_trait]
impl TextExtractor for DocumentExtractor {
    async fn extract(&self, source: &Source) -> Result<String> {
        let bytes = match source {
            Source::Path(path) => tokio::fs::read(path)
                .await
                .map_err(|e| Error::extraction(path.display().to_string(), e.to_string()))?,
            Source::Url(url) => self.fetch_url(url).await?,
        };

        let text = self.decode(source, bytes).await?;
        tracing::debug!(source = %source, chars = text.len(), "extracted document text");
        Ok(text)
    }
}
