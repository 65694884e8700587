//! Application state for the HTTP server
//!
//! Built once at process start and handed to every handler; this is the
//! explicit context object that replaces module-level service clients and a
//! bare global history list.

use std::sync::Arc;

use crate::config::RagConfig;
use crate::error::Result;
use crate::generation::AnswerSynthesizer;
use crate::history::SessionHistory;
use crate::ingestion::{DocumentExtractor, IngestionPipeline};
use crate::providers::{GeminiClient, PineconeIndex};
use crate::retrieval::Retriever;
use crate::study::StudyGenerator;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: RagConfig,
    pipeline: IngestionPipeline,
    retriever: Retriever,
    synthesizer: AnswerSynthesizer,
    study: StudyGenerator,
    history: SessionHistory,
}

impl AppState {
    /// Wire up the providers and pipeline components.
    ///
    /// Missing credentials are not an error here; each component checks its
    /// own credential when first invoked.
    pub fn new(config: RagConfig) -> Result<Self> {
        tracing::info!("initializing RAG application state");

        let gemini = Arc::new(GeminiClient::new(&config.embedding, &config.generation));
        let index = Arc::new(PineconeIndex::new(&config.index));
        let extractor = Arc::new(DocumentExtractor::new(config.extraction.timeout_secs));

        let pipeline = IngestionPipeline::new(
            extractor.clone(),
            gemini.clone(),
            index.clone(),
            &config.chunking,
        );
        let retriever = Retriever::new(gemini.clone(), index.clone());
        let synthesizer = AnswerSynthesizer::new(gemini.clone());
        let study = StudyGenerator::new(extractor, gemini, &config.study);
        let history = SessionHistory::new(&config.history);

        tracing::info!(
            index = %config.index.name,
            embed_model = %config.embedding.model,
            generate_model = %config.generation.model,
            "providers initialized"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pipeline,
                retriever,
                synthesizer,
                study,
                history,
            }),
        })
    }

    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    pub fn pipeline(&self) -> &IngestionPipeline {
        &self.inner.pipeline
    }

    pub fn retriever(&self) -> &Retriever {
        &self.inner.retriever
    }

    pub fn synthesizer(&self) -> &AnswerSynthesizer {
        &self.inner.synthesizer
    }

    pub fn study(&self) -> &StudyGenerator {
        &self.inner.study
    }

    pub fn history(&self) -> &SessionHistory {
        &self.inner.history
    }
}
