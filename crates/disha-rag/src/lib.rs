//! disha-rag: document Q&A backend for study material
//!
//! Ingests a student's document (local PDF/text file or remote URL), chunks
//! and embeds its text into a managed vector index, and answers later
//! questions with retrieval-augmented generation. Flashcard and MCQ
//! generation ride on the same extraction and generation services.

pub mod config;
pub mod error;
pub mod generation;
pub mod history;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod study;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use history::{ChatTurn, SessionHistory};
pub use types::{
    document::{Chunk, Document, IndexEntry, RetrievalMatch, Source},
    query::{ChatRequest, UploadRequest},
    response::{ChatResponse, UploadResponse},
};
