//! Generation provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Interface to the generation (LLM) service
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Fail fast if the provider is missing its credential
    fn ensure_configured(&self) -> Result<()> {
        Ok(())
    }

    /// Produce a free-text completion for `prompt`, returned verbatim
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model identifier in use
    fn model(&self) -> &str;
}
