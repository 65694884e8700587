//! Response types for the HTTP API

use serde::Serialize;

use crate::study::{Flashcard, Mcq};

/// POST /api/chatbot/chat response body
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    /// The generated answer, verbatim from the generation service
    #[serde(rename = "botResponse")]
    pub bot_response: String,
}

/// POST /api/chatbot/upload response body
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    #[serde(rename = "botResponse")]
    pub bot_response: String,
    /// Number of chunks written to the index
    pub chunks_indexed: usize,
}

impl UploadResponse {
    /// The confirmation message shown to the student after ingestion
    pub fn ingested(chunks_indexed: usize) -> Self {
        Self {
            bot_response: "Thank you for providing your PDF document. I have analyzed it, \
                           so now you can ask me any questions regarding it!"
                .to_string(),
            chunks_indexed,
        }
    }
}

/// POST /api/flashcards response body
#[derive(Debug, Clone, Serialize)]
pub struct FlashcardsResponse {
    pub flashcards: Vec<Flashcard>,
}

/// POST /api/mcqs response body
#[derive(Debug, Clone, Serialize)]
pub struct McqsResponse {
    pub mcqs: Vec<Mcq>,
}
