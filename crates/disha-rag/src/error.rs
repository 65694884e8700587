//! Error types for the RAG pipeline

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for RAG operations
pub type Result<T> = std::result::Result<T, Error>;

/// RAG pipeline errors
#[derive(Debug, Error)]
pub enum Error {
    /// A required credential or setting is absent
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request itself is unusable
    #[error("{0}")]
    InvalidRequest(String),

    /// Text extraction from a document source failed
    #[error("Failed to extract text from '{source_name}': {message}")]
    Extraction {
        source_name: String,
        message: String,
    },

    /// Extraction succeeded but chunking produced no usable text
    #[error("No extractable text found in the provided document")]
    EmptyContent,

    /// Embedding service failure
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Vector index service failure
    #[error("Vector index error: {0}")]
    Index(String),

    /// Generation service failure
    #[error("Generation failed: {0}")]
    Generation(String),

    /// A structured completion could not be parsed by any strategy
    #[error("Failed to parse model output: {message}")]
    ParseFailure {
        message: String,
        /// Raw completion text, kept for diagnostics
        raw: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an extraction error
    pub fn extraction(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Extraction {
            source_name: source.into(),
            message: message.into(),
        }
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create a vector index error
    pub fn index(message: impl Into<String>) -> Self {
        Self::Index(message.into())
    }

    /// Create a generation error
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }

    /// Create a parse failure carrying the raw completion
    pub fn parse_failure(message: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::ParseFailure {
            message: message.into(),
            raw: raw.into(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            Error::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error", msg.clone()),
            Error::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, "invalid_request", msg.clone()),
            Error::Extraction {
                source_name,
                message,
            } => (
                StatusCode::BAD_REQUEST,
                "extraction_error",
                format!("Failed to extract text from '{}': {}", source_name, message),
            ),
            Error::EmptyContent => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "empty_content",
                self.to_string(),
            ),
            Error::Embedding(msg) => (StatusCode::BAD_GATEWAY, "embedding_error", msg.clone()),
            Error::Index(msg) => (StatusCode::BAD_GATEWAY, "index_error", msg.clone()),
            Error::Generation(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "generation_error", msg.clone())
            }
            Error::ParseFailure { message, .. } => {
                (StatusCode::BAD_GATEWAY, "parse_error", message.clone())
            }
            Error::Io(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "io_error",
                err.to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
