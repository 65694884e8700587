//! Request types for the HTTP API

use serde::Deserialize;

/// POST /api/chatbot/upload and /api/flashcards request body
///
/// The frontend sends the capitalized `Path` field; the lowercase alias is
/// accepted for hand-written clients.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadRequest {
    /// Document source: local path or http(s) URL
    #[serde(alias = "Path", alias = "path")]
    pub source: String,
    /// Optional namespace isolating this document's vectors
    #[serde(default)]
    pub namespace: Option<String>,
}

/// POST /api/chatbot/chat request body
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// The student's question
    #[serde(rename = "userMessage")]
    pub user_message: String,
    /// Number of context chunks to retrieve
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Optional namespace restricting retrieval
    #[serde(default)]
    pub namespace: Option<String>,
}

fn default_top_k() -> usize {
    4
}
