//! RAG server binary
//!
//! Run with: cargo run -p disha-rag --bin disha-rag-server

use std::path::PathBuf;

use disha_rag::{config::RagConfig, server::RagServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Secrets (GEMINI_API_KEY, PINECONE_API_KEY) come from .env or the
    // environment; a missing key only fails the first call that needs it.
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "disha_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = std::env::var("DISHA_RAG_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("disha-rag.toml"));
    let config = RagConfig::load(&config_path)?;

    tracing::info!("configuration loaded from {}", config_path.display());
    tracing::info!("  - embedding model: {}", config.embedding.model);
    tracing::info!("  - generation model: {}", config.generation.model);
    tracing::info!("  - vector index: {}", config.index.name);
    tracing::info!("  - chunk size: {} chars", config.chunking.max_chars);

    let server = RagServer::new(config)?;
    tracing::info!("API: http://{}", server.address());

    server.start().await?;

    Ok(())
}
