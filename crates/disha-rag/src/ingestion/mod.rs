//! Document ingestion pipeline: extract, chunk, embed, index

pub mod chunker;
pub mod extractor;

pub use chunker::chunk_text;
pub use extractor::{DocumentExtractor, TextExtractor};

use std::sync::Arc;
use uuid::Uuid;

use crate::config::ChunkingConfig;
use crate::error::{Error, Result};
use crate::providers::{EmbeddingProvider, VectorIndexProvider};
use crate::types::{IndexEntry, Source};

/// Summary of one completed ingestion
#[derive(Debug, Clone)]
pub struct IngestReport {
    /// Identifier minted for this ingestion; chunk ids derive from it
    pub ingestion_id: Uuid,
    /// Number of chunks embedded and upserted
    pub chunks: usize,
    /// Embedding dimension observed on the first vector
    pub dimension: usize,
}

/// The ingest path: extraction -> chunking -> embedding -> index upsert
///
/// Synchronous per request; every remote call is awaited in sequence, so
/// chunk order is preserved from extraction through identifier assignment.
pub struct IngestionPipeline {
    extractor: Arc<dyn TextExtractor>,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndexProvider>,
    max_chunk_chars: usize,
}

impl IngestionPipeline {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndexProvider>,
        chunking: &ChunkingConfig,
    ) -> Self {
        Self {
            extractor,
            embedder,
            index,
            max_chunk_chars: chunking.max_chars,
        }
    }

    /// Ingest one document into the index, optionally under a namespace.
    ///
    /// Chunk identifiers are `doc-{ingestion_id}-{chunk_index}`: stable
    /// within this call, disjoint from every other ingestion, so repeated
    /// uploads of the same document grow the index rather than overwrite it.
    pub async fn ingest(&self, source: &Source, namespace: Option<&str>) -> Result<IngestReport> {
        // Credentials are checked before any extraction work so a
        // misconfigured process fails before touching remote services.
        self.embedder.ensure_configured()?;
        self.index.ensure_configured()?;

        let text = self.extractor.extract(source).await?;

        let chunks = chunk_text(&text, self.max_chunk_chars);
        if chunks.is_empty() {
            return Err(Error::EmptyContent);
        }

        tracing::info!(source = %source, chunks = chunks.len(), "chunked document");

        // One embedding call per chunk, in order. Latency scales with chunk
        // count; correctness depends only on the ordering.
        let mut embeddings = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            embeddings.push(self.embedder.embed(&chunk.text).await?);
        }

        let dimension = embeddings[0].len();
        self.index.ensure_index(dimension).await?;

        let ingestion_id = Uuid::new_v4();
        let entries: Vec<IndexEntry> = chunks
            .iter()
            .zip(embeddings)
            .map(|(chunk, values)| {
                IndexEntry::new(
                    format!("doc-{}-{}", ingestion_id, chunk.index),
                    values,
                    &chunk.text,
                )
            })
            .collect();

        self.index.upsert(&entries, namespace).await?;

        tracing::info!(
            source = %source,
            ingestion_id = %ingestion_id,
            chunks = entries.len(),
            dimension,
            "ingestion complete"
        );

        Ok(IngestReport {
            ingestion_id,
            chunks: entries.len(),
            dimension,
        })
    }
}
