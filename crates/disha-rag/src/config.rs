//! Configuration for the RAG system

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Main RAG system configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Embedding service configuration
    pub embedding: EmbeddingConfig,
    /// Generation service configuration
    pub generation: GenerationConfig,
    /// Vector index configuration
    pub index: IndexConfig,
    /// Document extraction configuration
    pub extraction: ExtractionConfig,
    /// Chunking configuration
    pub chunking: ChunkingConfig,
    /// Session history retention
    pub history: HistoryConfig,
    /// Sibling study-material generators
    pub study: StudyConfig,
}

impl RagConfig {
    /// Load configuration from a TOML file, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("invalid config file '{}': {}", path.display(), e)))
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            enable_cors: true,
        }
    }
}

/// Embedding service (Gemini) configuration
///
/// The API key is not part of the file-backed config; it is read from the
/// `GEMINI_API_KEY` environment variable when the client is constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding model name
    pub model: String,
    /// API base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: "models/text-embedding-004".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Generation service (Gemini) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Chat/completion model name
    pub model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "models/gemini-1.5-flash".to_string(),
            timeout_secs: 120,
        }
    }
}

/// Vector index (Pinecone) configuration
///
/// The API key comes from the `PINECONE_API_KEY` environment variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Index name
    pub name: String,
    /// Control-plane base URL
    pub control_url: String,
    /// Cloud provider for serverless index creation
    pub cloud: String,
    /// Region for serverless index creation
    pub region: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            name: "genai-index".to_string(),
            control_url: "https://api.pinecone.io".to_string(),
            cloud: "aws".to_string(),
            region: "us-east-1".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Document extraction configuration
///
/// Fetching a large PDF takes far longer than an embedding round-trip, so
/// extraction carries its own timeout instead of borrowing the embedding one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Timeout in seconds for document downloads
    pub timeout_secs: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self { timeout_secs: 300 }
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Maximum chunk length in characters
    pub max_chars: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self { max_chars: 1200 }
    }
}

/// Session history retention policy
///
/// `max_turns = None` keeps every turn for the life of the process;
/// `Some(n)` drops the oldest turn once `n` is exceeded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum retained turns, unbounded when absent
    pub max_turns: Option<usize>,
}

/// Flashcard/MCQ generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyConfig {
    /// Maximum document characters fed into a generation prompt
    pub max_prompt_chars: usize,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            max_prompt_chars: 4000,
        }
    }
}
