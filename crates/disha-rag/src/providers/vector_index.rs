//! Vector index provider trait

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::Result;
use crate::types::IndexEntry;

/// One nearest-neighbor match, normalized at the service boundary
///
/// Index services answer in more than one shape (object-like and
/// mapping-like results); clients convert whatever they receive into this
/// record immediately, so nothing deeper in the pipeline branches on
/// response shape.
#[derive(Debug, Clone)]
pub struct IndexMatch {
    /// Entry identifier
    pub id: String,
    /// Similarity score under the index's metric
    pub score: f32,
    /// Entry metadata, absent when the service omits it
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

impl IndexMatch {
    /// The stored chunk text, if the metadata carries it
    pub fn text(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.get("text"))
            .and_then(|v| v.as_str())
    }
}

/// Interface to the managed vector index service
///
/// The index's similarity metric (cosine) and dimensionality are fixed at
/// creation; upserts are not transactional, so a partial write surfaces as
/// an error rather than being hidden.
#[async_trait]
pub trait VectorIndexProvider: Send + Sync {
    /// Fail fast if the provider is missing its credential
    fn ensure_configured(&self) -> Result<()> {
        Ok(())
    }

    /// Create the backing index if absent, with the given dimension and
    /// cosine metric. Idempotent when the index already exists.
    async fn ensure_index(&self, dimension: usize) -> Result<()>;

    /// Write or overwrite entries keyed by identifier, optionally scoped to
    /// a namespace.
    async fn upsert(&self, entries: &[IndexEntry], namespace: Option<&str>) -> Result<()>;

    /// Nearest-neighbor query with metadata included. Returns at most
    /// `top_k` matches ranked by descending similarity; fewer (including
    /// zero) is a valid result.
    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        namespace: Option<&str>,
    ) -> Result<Vec<IndexMatch>>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
