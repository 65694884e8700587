//! Document upload endpoint

use axum::{extract::State, Json};
use std::time::Instant;

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{query::UploadRequest, response::UploadResponse, Source};

/// POST /api/chatbot/upload - ingest a document into the index
pub async fn upload_document(
    State(state): State<AppState>,
    Json(request): Json<UploadRequest>,
) -> Result<Json<UploadResponse>> {
    let start = Instant::now();
    let source = Source::parse(&request.source);

    tracing::info!(source = %source, "ingestion requested");

    let report = state
        .pipeline()
        .ingest(&source, request.namespace.as_deref())
        .await?;

    tracing::info!(
        source = %source,
        chunks = report.chunks,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "ingestion finished"
    );

    Ok(Json(UploadResponse::ingested(report.chunks)))
}
