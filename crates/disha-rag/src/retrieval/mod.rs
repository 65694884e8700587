//! Query-side retrieval: embed the question, fetch nearest chunks

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::providers::{EmbeddingProvider, VectorIndexProvider};
use crate::types::RetrievalMatch;

/// Retrieves the top-k most similar chunks for a question
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndexProvider>,
}

impl Retriever {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, index: Arc<dyn VectorIndexProvider>) -> Self {
        Self { embedder, index }
    }

    /// Return at most `top_k` matches for `question`, ranked by descending
    /// similarity, restricted to `namespace` when given. `top_k` must be at
    /// least 1.
    ///
    /// A sparse or empty index yields fewer matches, possibly none; that is
    /// a valid "no relevant context" result, not an error.
    pub async fn retrieve(
        &self,
        question: &str,
        top_k: usize,
        namespace: Option<&str>,
    ) -> Result<Vec<RetrievalMatch>> {
        if top_k == 0 {
            return Err(Error::InvalidRequest(
                "top_k must be at least 1".to_string(),
            ));
        }

        self.embedder.ensure_configured()?;
        self.index.ensure_configured()?;

        let query_vector = self.embedder.embed(question).await?;
        let raw = self.index.query(&query_vector, top_k, namespace).await?;

        // Matches without stored text cannot ground an answer; drop them.
        let mut matches: Vec<RetrievalMatch> = raw
            .into_iter()
            .filter_map(|m| {
                let text = m.text()?.to_string();
                Some(RetrievalMatch {
                    id: m.id,
                    score: m.score,
                    text,
                })
            })
            .collect();

        // The index usually answers ranked; ordering and the caller's limit
        // are still enforced here.
        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches.truncate(top_k);

        tracing::debug!(
            question_chars = question.len(),
            matches = matches.len(),
            top_k,
            "retrieval complete"
        );

        Ok(matches)
    }
}
