//! API routes for the RAG server

pub mod ingest;
pub mod query;
pub mod study;

use axum::{
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Chatbot: ingestion and grounded Q&A
        .route("/chatbot/upload", post(ingest::upload_document))
        .route("/chatbot/chat", post(query::chat))
        // Study material generators
        .route("/flashcards", post(study::flashcards))
        .route("/mcqs", post(study::mcqs))
        // Info
        .route("/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "disha-rag",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Document Q&A with retrieval-augmented answers",
        "endpoints": {
            "POST /api/chatbot/upload": "Ingest a document for Q&A",
            "POST /api/chatbot/chat": "Ask a question about ingested documents",
            "POST /api/flashcards": "Generate flashcards from a document",
            "POST /api/mcqs": "Generate multiple-choice questions from a document"
        }
    }))
}
