//! Document, chunk, and index entry types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Where a document's bytes come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    /// Local filesystem path
    Path(PathBuf),
    /// Remote `http(s)://` URL
    Url(String),
}

impl Source {
    /// Classify a raw source string: URLs by scheme, everything else a path.
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Url(raw.to_string())
        } else {
            Self::Path(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::Url(u) => write!(f, "{}", u),
        }
    }
}

/// A document under ingestion: source plus its extracted text.
///
/// Lives only for the duration of one ingestion call; dropped after chunking.
#[derive(Debug, Clone)]
pub struct Document {
    /// Source identifier
    pub source: Source,
    /// Extracted text, possibly empty
    pub text: String,
}

/// A bounded contiguous segment of a document's extracted text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Ordered position within the document
    pub index: usize,
    /// Trimmed, non-empty text content
    pub text: String,
}

impl Chunk {
    pub fn new(index: usize, text: String) -> Self {
        Self { index, text }
    }
}

/// A record written to the vector index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Identifier, unique within a namespace
    pub id: String,
    /// Embedding vector; length must equal the index dimension
    pub values: Vec<f32>,
    /// Metadata attached to the vector, at minimum the chunk text
    pub metadata: HashMap<String, serde_json::Value>,
}

impl IndexEntry {
    /// Build an entry carrying the chunk text as metadata
    pub fn new(id: String, values: Vec<f32>, text: &str) -> Self {
        let mut metadata = HashMap::new();
        metadata.insert("text".to_string(), serde_json::Value::String(text.to_string()));
        Self {
            id,
            values,
            metadata,
        }
    }

    /// The stored chunk text, if present
    pub fn text(&self) -> Option<&str> {
        self.metadata.get("text").and_then(|v| v.as_str())
    }
}

/// A retrieved chunk with its similarity score
#[derive(Debug, Clone, Serialize)]
pub struct RetrievalMatch {
    /// Index entry identifier
    pub id: String,
    /// Similarity score, higher is more similar
    pub score: f32,
    /// The original chunk text
    pub text: String,
}
