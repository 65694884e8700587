//! End-to-end pipeline tests against in-memory fake providers
//!
//! The provider traits let the whole ingest and query paths run without any
//! remote service: a fake extractor supplies text, a deterministic embedder
//! stands in for the embedding service, and a fake index ranks by real
//! cosine similarity.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use disha_rag::config::{ChunkingConfig, HistoryConfig};
use disha_rag::error::{Error, Result};
use disha_rag::generation::AnswerSynthesizer;
use disha_rag::history::SessionHistory;
use disha_rag::ingestion::{IngestionPipeline, TextExtractor};
use disha_rag::providers::{
    EmbeddingProvider, GenerationProvider, IndexMatch, VectorIndexProvider,
};
use disha_rag::retrieval::Retriever;
use disha_rag::types::{IndexEntry, Source};

/// Extractor returning a fixed text for any source
struct FakeExtractor {
    text: String,
}

#[async_trait]
impl TextExtractor for FakeExtractor {
    async fn extract(&self, _source: &Source) -> Result<String> {
        Ok(self.text.clone())
    }
}

/// Deterministic embedder: a 4-dimensional vector derived from the text
struct FakeEmbedder {
    calls: AtomicUsize,
}

impl FakeEmbedder {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    fn vector_for(text: &str) -> Vec<f32> {
        let bytes = text.as_bytes();
        let sum: u64 = bytes.iter().map(|&b| b as u64).sum();
        let raw = [
            (text.len() % 97) as f32 + 1.0,
            (sum % 89) as f32 + 1.0,
            bytes.first().copied().unwrap_or(1) as f32,
            bytes.last().copied().unwrap_or(1) as f32,
        ];
        let norm = raw.iter().map(|x| x * x).sum::<f32>().sqrt();
        raw.iter().map(|x| x / norm).collect()
    }
}

#[async_trait]
impl EmbeddingProvider for FakeEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Self::vector_for(text))
    }

    fn name(&self) -> &str {
        "fake-embedder"
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let nb: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    dot / (na * nb)
}

/// In-memory index with cosine ranking and namespace partitions
#[derive(Default)]
struct FakeIndex {
    dimension: Mutex<Option<usize>>,
    store: Mutex<HashMap<String, Vec<IndexEntry>>>,
    upsert_calls: AtomicUsize,
}

impl FakeIndex {
    fn namespace_key(namespace: Option<&str>) -> String {
        namespace.unwrap_or("").to_string()
    }

    fn len(&self, namespace: Option<&str>) -> usize {
        self.store
            .lock()
            .get(&Self::namespace_key(namespace))
            .map(|v| v.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl VectorIndexProvider for FakeIndex {
    async fn ensure_index(&self, dimension: usize) -> Result<()> {
        let mut dim = self.dimension.lock();
        match *dim {
            Some(existing) if existing != dimension => Err(Error::index(format!(
                "dimension mismatch: index has {}, got {}",
                existing, dimension
            ))),
            _ => {
                *dim = Some(dimension);
                Ok(())
            }
        }
    }

    async fn upsert(&self, entries: &[IndexEntry], namespace: Option<&str>) -> Result<()> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        let mut store = self.store.lock();
        let bucket = store.entry(Self::namespace_key(namespace)).or_default();
        for entry in entries {
            bucket.retain(|e| e.id != entry.id);
            bucket.push(entry.clone());
        }
        Ok(())
    }

    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        namespace: Option<&str>,
    ) -> Result<Vec<IndexMatch>> {
        let store = self.store.lock();
        let mut matches: Vec<IndexMatch> = store
            .get(&Self::namespace_key(namespace))
            .map(|bucket| {
                bucket
                    .iter()
                    .map(|entry| IndexMatch {
                        id: entry.id.clone(),
                        score: cosine(vector, &entry.values),
                        metadata: Some(entry.metadata.clone()),
                    })
                    .collect()
            })
            .unwrap_or_default();

        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches.truncate(top_k);
        Ok(matches)
    }

    fn name(&self) -> &str {
        "fake-index"
    }
}

/// Extractor counting how many times it was invoked
#[derive(Default)]
struct CountingExtractor {
    calls: AtomicUsize,
}

#[async_trait]
impl TextExtractor for CountingExtractor {
    async fn extract(&self, _source: &Source) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok("some extracted text".to_string())
    }
}

/// Embedder standing in for a process started without its API key
struct UnconfiguredEmbedder;

#[async_trait]
impl EmbeddingProvider for UnconfiguredEmbedder {
    fn ensure_configured(&self) -> Result<()> {
        Err(Error::Config("embedding API key not set".to_string()))
    }

    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        panic!("embed must not be reached without a credential");
    }

    fn name(&self) -> &str {
        "unconfigured-embedder"
    }
}

/// Index answering canned matches, some of which lack stored text
struct TextlessIndex;

#[async_trait]
impl VectorIndexProvider for TextlessIndex {
    async fn ensure_index(&self, _dimension: usize) -> Result<()> {
        Ok(())
    }

    async fn upsert(&self, _entries: &[IndexEntry], _namespace: Option<&str>) -> Result<()> {
        Ok(())
    }

    async fn query(
        &self,
        _vector: &[f32],
        _top_k: usize,
        _namespace: Option<&str>,
    ) -> Result<Vec<IndexMatch>> {
        let mut with_text = HashMap::new();
        with_text.insert(
            "text".to_string(),
            serde_json::Value::String("usable chunk".to_string()),
        );
        Ok(vec![
            IndexMatch {
                id: "doc-a-0".to_string(),
                score: 0.9,
                metadata: None,
            },
            IndexMatch {
                id: "doc-a-1".to_string(),
                score: 0.8,
                metadata: Some(with_text),
            },
            IndexMatch {
                id: "doc-a-2".to_string(),
                score: 0.7,
                metadata: Some(HashMap::new()),
            },
        ])
    }

    fn name(&self) -> &str {
        "textless-index"
    }
}

/// Generation service echoing a canned answer and recording prompts
struct FakeLlm {
    prompts: Mutex<Vec<String>>,
}

impl FakeLlm {
    fn new() -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl GenerationProvider for FakeLlm {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().push(prompt.to_string());
        Ok("Here is my best explanation of that topic.".to_string())
    }

    fn name(&self) -> &str {
        "fake-llm"
    }

    fn model(&self) -> &str {
        "fake-model"
    }
}

fn pipeline_with(
    text: &str,
    embedder: Arc<FakeEmbedder>,
    index: Arc<FakeIndex>,
    max_chars: usize,
) -> IngestionPipeline {
    IngestionPipeline::new(
        Arc::new(FakeExtractor {
            text: text.to_string(),
        }),
        embedder,
        index,
        &ChunkingConfig { max_chars },
    )
}

#[tokio::test]
async fn ingest_2500_separator_free_chars_yields_three_chunks() {
    let embedder = Arc::new(FakeEmbedder::new());
    let index = Arc::new(FakeIndex::default());
    let text = "a".repeat(2500);
    let pipeline = pipeline_with(&text, embedder.clone(), index.clone(), 1200);

    let report = pipeline
        .ingest(&Source::parse("uploads/dense.pdf"), None)
        .await
        .unwrap();

    assert_eq!(report.chunks, 3);
    assert_eq!(report.dimension, 4);
    assert_eq!(index.len(None), 3);
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 3);

    // Identifiers are ingestion-scoped and positional.
    let store = index.store.lock();
    let bucket = &store[""];
    for (i, entry) in bucket.iter().enumerate() {
        assert_eq!(entry.id, format!("doc-{}-{}", report.ingestion_id, i));
        let len = entry.text().unwrap().chars().count();
        assert!(len > 0 && len <= 1200);
    }
}

#[tokio::test]
async fn empty_extraction_fails_before_any_remote_call() {
    let embedder = Arc::new(FakeEmbedder::new());
    let index = Arc::new(FakeIndex::default());
    let pipeline = pipeline_with("", embedder.clone(), index.clone(), 1200);

    let err = pipeline
        .ingest(&Source::parse("uploads/blank.pdf"), None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::EmptyContent));
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 0);
    assert_eq!(index.upsert_calls.load(Ordering::SeqCst), 0);
    assert!(index.dimension.lock().is_none());
}

#[tokio::test]
async fn missing_credential_aborts_before_extraction() {
    let extractor = Arc::new(CountingExtractor::default());
    let index = Arc::new(FakeIndex::default());
    let pipeline = IngestionPipeline::new(
        extractor.clone(),
        Arc::new(UnconfiguredEmbedder),
        index.clone(),
        &ChunkingConfig { max_chars: 1200 },
    );

    let err = pipeline
        .ingest(&Source::parse("uploads/notes.pdf"), None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Config(_)));
    assert_eq!(extractor.calls.load(Ordering::SeqCst), 0);
    assert_eq!(index.upsert_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn matches_without_stored_text_are_dropped() {
    let retriever = Retriever::new(Arc::new(FakeEmbedder::new()), Arc::new(TextlessIndex));

    let matches = retriever.retrieve("anything", 4, None).await.unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, "doc-a-1");
    assert_eq!(matches[0].text, "usable chunk");
}

#[tokio::test]
async fn zero_top_k_is_rejected_up_front() {
    let embedder = Arc::new(FakeEmbedder::new());
    let retriever = Retriever::new(embedder.clone(), Arc::new(FakeIndex::default()));

    let err = retriever.retrieve("a question", 0, None).await.unwrap_err();

    assert!(matches!(err, Error::InvalidRequest(_)));
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn sparse_namespace_returns_fewer_than_k_matches() {
    let embedder = Arc::new(FakeEmbedder::new());
    let index = Arc::new(FakeIndex::default());
    let text = "photosynthesis\nosmosis";
    let pipeline = pipeline_with(text, embedder.clone(), index.clone(), 45);

    let report = pipeline
        .ingest(&Source::parse("uploads/bio.pdf"), Some("bio"))
        .await
        .unwrap();
    assert_eq!(report.chunks, 2);

    let retriever = Retriever::new(embedder, index);
    let matches = retriever
        .retrieve("how does osmosis work?", 4, Some("bio"))
        .await
        .unwrap();

    assert_eq!(matches.len(), 2);
    assert!(matches[0].score >= matches[1].score);
}

#[tokio::test]
async fn empty_namespace_still_gets_a_best_effort_answer() {
    let embedder = Arc::new(FakeEmbedder::new());
    let index = Arc::new(FakeIndex::default());
    let llm = Arc::new(FakeLlm::new());

    let retriever = Retriever::new(embedder, index);
    let synthesizer = AnswerSynthesizer::new(llm.clone());
    let history = SessionHistory::new(&HistoryConfig::default());

    let question = "what is in my notes?";
    let matches = retriever
        .retrieve(question, 4, Some("never-ingested"))
        .await
        .unwrap();
    assert!(matches.is_empty());

    let answer = synthesizer.answer(question, &matches).await.unwrap();
    assert!(!answer.is_empty());
    history.record(question, answer.as_str());
    assert_eq!(history.len(), 1);

    // The prompt still carried the preamble and question around an empty
    // context section.
    let prompts = llm.prompts.lock();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Disha Mitra"));
    assert!(prompts[0].contains("CONTEXT:\n\n"));
    assert!(prompts[0].contains(question));
}

#[tokio::test]
async fn chunk_text_round_trips_through_index_metadata() {
    let embedder = Arc::new(FakeEmbedder::new());
    let index = Arc::new(FakeIndex::default());
    // No separators, so the whole text is one chunk and the query embeds
    // identically to it.
    let text = "Mitochondria-are-the-powerhouse-of-the-cell.";
    let pipeline = pipeline_with(text, embedder.clone(), index.clone(), 1200);

    pipeline
        .ingest(&Source::parse("uploads/cell.pdf"), Some("cell"))
        .await
        .unwrap();

    let retriever = Retriever::new(embedder, index);
    let matches = retriever.retrieve(text, 1, Some("cell")).await.unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].text, text);
    assert!((matches[0].score - 1.0).abs() < 1e-5);
}

#[tokio::test]
async fn repeated_ingestion_grows_the_index() {
    let embedder = Arc::new(FakeEmbedder::new());
    let index = Arc::new(FakeIndex::default());
    let text = "the water cycle has evaporation, condensation, and precipitation stages";
    let pipeline = pipeline_with(text, embedder, index.clone(), 1200);

    let first = pipeline
        .ingest(&Source::parse("uploads/cycle.pdf"), None)
        .await
        .unwrap();
    let second = pipeline
        .ingest(&Source::parse("uploads/cycle.pdf"), None)
        .await
        .unwrap();

    // No content dedup: disjoint identifiers, strictly growing index.
    assert_ne!(first.ingestion_id, second.ingestion_id);
    assert_eq!(index.len(None), first.chunks + second.chunks);
}

#[tokio::test]
async fn namespaces_isolate_retrieval() {
    let embedder = Arc::new(FakeEmbedder::new());
    let index = Arc::new(FakeIndex::default());
    let pipeline = pipeline_with("stoichiometry", embedder.clone(), index.clone(), 1200);

    pipeline
        .ingest(&Source::parse("uploads/chem.pdf"), Some("chem"))
        .await
        .unwrap();

    let retriever = Retriever::new(embedder, index);
    let other = retriever
        .retrieve("stoichiometry", 4, Some("history"))
        .await
        .unwrap();
    assert!(other.is_empty());

    let same = retriever
        .retrieve("stoichiometry", 4, Some("chem"))
        .await
        .unwrap();
    assert_eq!(same.len(), 1);
}

#[tokio::test]
async fn retriever_never_exceeds_top_k() {
    let embedder = Arc::new(FakeEmbedder::new());
    let index = Arc::new(FakeIndex::default());
    let text = "alpha one\nbeta two\ngamma three\ndelta four\nepsilon five\nzeta six";
    let pipeline = pipeline_with(text, embedder.clone(), index.clone(), 12);

    let report = pipeline
        .ingest(&Source::parse("uploads/many.pdf"), None)
        .await
        .unwrap();
    assert!(report.chunks > 2);

    let retriever = Retriever::new(embedder, index);
    let matches = retriever.retrieve("gamma three", 2, None).await.unwrap();
    assert_eq!(matches.len(), 2);
}

#[tokio::test]
async fn embed_batch_preserves_order_and_count() {
    let embedder = FakeEmbedder::new();
    let texts: Vec<String> = (0..5).map(|i| format!("chunk number {}", i)).collect();

    let batch = embedder.embed_batch(&texts).await.unwrap();

    assert_eq!(batch.len(), texts.len());
    for (text, vector) in texts.iter().zip(&batch) {
        assert_eq!(vector, &FakeEmbedder::vector_for(text));
    }
}
