//! Flashcard and MCQ endpoints

use axum::{extract::State, Json};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{
    query::UploadRequest,
    response::{FlashcardsResponse, McqsResponse},
    Source,
};

/// POST /api/flashcards - generate flashcards from a document
pub async fn flashcards(
    State(state): State<AppState>,
    Json(request): Json<UploadRequest>,
) -> Result<Json<FlashcardsResponse>> {
    let source = Source::parse(&request.source);
    let flashcards = state.study().generate_flashcards(&source).await?;

    tracing::info!(source = %source, count = flashcards.len(), "flashcards generated");
    Ok(Json(FlashcardsResponse { flashcards }))
}

/// POST /api/mcqs - generate multiple-choice questions from a document
pub async fn mcqs(
    State(state): State<AppState>,
    Json(request): Json<UploadRequest>,
) -> Result<Json<McqsResponse>> {
    let source = Source::parse(&request.source);
    let mcqs = state.study().generate_mcqs(&source).await?;

    tracing::info!(source = %source, count = mcqs.len(), "MCQs generated");
    Ok(Json(McqsResponse { mcqs }))
}
