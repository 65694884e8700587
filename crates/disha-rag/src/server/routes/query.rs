//! Chat endpoint: retrieval-augmented Q&A

use axum::{extract::State, Json};
use std::time::Instant;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{query::ChatRequest, response::ChatResponse};

/// POST /api/chatbot/chat - answer a question from ingested documents
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let question = request.user_message.trim();
    if question.is_empty() {
        return Err(Error::InvalidRequest(
            "Please provide a message to process.".to_string(),
        ));
    }

    let start = Instant::now();
    tracing::info!(top_k = request.top_k, "chat question received");

    let matches = state
        .retriever()
        .retrieve(question, request.top_k, request.namespace.as_deref())
        .await?;

    let answer = state.synthesizer().answer(question, &matches).await?;

    // Recorded only after the answer succeeds; a failed turn leaves the
    // history untouched.
    state.history().record(question, answer.as_str());

    tracing::info!(
        matches = matches.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "chat answered"
    );

    Ok(Json(ChatResponse {
        bot_response: answer,
    }))
}
