//! Gemini API client for embeddings and generation
//!
//! One HTTP client serves both provider traits, mirroring how the upstream
//! app used a single configured SDK for embedding and chat calls. The
//! credential is read from `GEMINI_API_KEY` at construction and checked when
//! a call is first made; no retries happen here, retry policy belongs to the
//! caller.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::{EmbeddingConfig, GenerationConfig};
use crate::error::{Error, Result};

use super::embedding::EmbeddingProvider;
use super::llm::GenerationProvider;

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Gemini REST client
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    embed_model: String,
    generate_model: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedContentRequest<'a> {
    content: Content<'a>,
}

#[derive(Serialize)]
struct BatchEmbedRequest<'a> {
    requests: Vec<BatchEmbedItem<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchEmbedItem<'a> {
    model: &'a str,
    content: Content<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbedContentResponse {
    embedding: EmbeddingValues,
}

#[derive(Deserialize)]
struct BatchEmbedResponse {
    embeddings: Vec<EmbeddingValues>,
}

#[derive(Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RoleContent<'a>>,
}

#[derive(Serialize)]
struct RoleContent<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    /// Build a client from configuration, picking the API key up from the
    /// environment. A missing key is not an error yet; the first call that
    /// needs it fails with a configuration error.
    pub fn new(embedding: &EmbeddingConfig, generation: &GenerationConfig) -> Self {
        let timeout = embedding.timeout_secs.max(generation.timeout_secs);
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            api_key: std::env::var(API_KEY_VAR).ok(),
            base_url: embedding.base_url.clone(),
            embed_model: embedding.model.clone(),
            generate_model: generation.model.clone(),
        }
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| Error::Config(format!("{} not set in environment", API_KEY_VAR)))
    }

    fn endpoint(&self, model: &str, method: &str) -> Result<String> {
        Ok(format!(
            "{}/v1beta/{}:{}?key={}",
            self.base_url,
            model,
            method,
            self.api_key()?
        ))
    }
}

#[async_trait]
impl EmbeddingProvider for GeminiClient {
    fn ensure_configured(&self) -> Result<()> {
        self.api_key().map(|_| ())
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let url = self.endpoint(&self.embed_model, "embedContent")?;
        let request = EmbedContentRequest {
            content: Content {
                parts: vec![Part { text }],
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::embedding(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::embedding(format!("HTTP {} - {}", status, body)));
        }

        let parsed: EmbedContentResponse = response
            .json()
            .await
            .map_err(|e| Error::embedding(format!("unexpected response: {}", e)))?;

        Ok(parsed.embedding.values)
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.endpoint(&self.embed_model, "batchEmbedContents")?;
        let request = BatchEmbedRequest {
            requests: texts
                .iter()
                .map(|text| BatchEmbedItem {
                    model: &self.embed_model,
                    content: Content {
                        parts: vec![Part { text }],
                    },
                })
                .collect(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::embedding(format!("batch request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::embedding(format!("HTTP {} - {}", status, body)));
        }

        let parsed: BatchEmbedResponse = response
            .json()
            .await
            .map_err(|e| Error::embedding(format!("unexpected response: {}", e)))?;

        if parsed.embeddings.len() != texts.len() {
            return Err(Error::embedding(format!(
                "service returned {} vectors for {} inputs",
                parsed.embeddings.len(),
                texts.len()
            )));
        }

        Ok(parsed.embeddings.into_iter().map(|e| e.values).collect())
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

#[async_trait]
impl GenerationProvider for GeminiClient {
    fn ensure_configured(&self) -> Result<()> {
        self.api_key().map(|_| ())
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = self.endpoint(&self.generate_model, "generateContent")?;
        let request = GenerateContentRequest {
            contents: vec![RoleContent {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
        };

        tracing::debug!(model = %self.generate_model, prompt_chars = prompt.len(), "generation request");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::generation(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::generation(format!("HTTP {} - {}", status, body)));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::generation(format!("unexpected response: {}", e)))?;

        let text: String = parsed
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(Error::generation("service returned no candidates"));
        }

        Ok(text)
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.generate_model
    }
}
