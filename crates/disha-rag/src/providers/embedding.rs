//! Embedding provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Interface to the embedding service
///
/// Output vectors have a fixed dimension shared with the vector index; the
/// batch call preserves input order and count. Failures propagate to the
/// caller without internal retries.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Fail fast if the provider is missing its credential.
    ///
    /// Called before any pipeline work so ingestion aborts before touching
    /// the extraction service or the index.
    fn ensure_configured(&self) -> Result<()> {
        Ok(())
    }

    /// Embed a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed multiple texts; position `i` of the output corresponds to
    /// position `i` of the input.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text).await?);
        }
        Ok(embeddings)
    }

    /// Provider name for logging
    fn name(&self) -> &str;
}
