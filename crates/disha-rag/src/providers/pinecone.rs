//! Pinecone vector index client
//!
//! Control-plane calls (list/create/describe index) go to the API base URL;
//! data-plane calls (upsert/query) go to the index's own host, resolved once
//! and cached. Query responses are normalized into [`IndexMatch`] records at
//! this boundary regardless of which shape the service answers with.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::config::IndexConfig;
use crate::error::{Error, Result};
use crate::types::IndexEntry;

use super::vector_index::{IndexMatch, VectorIndexProvider};

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "PINECONE_API_KEY";

/// Pinecone index client
pub struct PineconeIndex {
    client: Client,
    api_key: Option<String>,
    config: IndexConfig,
    /// Data-plane host for the index, resolved lazily
    host: OnceCell<String>,
}

#[derive(Serialize)]
struct CreateIndexRequest<'a> {
    name: &'a str,
    dimension: usize,
    metric: &'a str,
    spec: CreateIndexSpec<'a>,
}

#[derive(Serialize)]
struct CreateIndexSpec<'a> {
    serverless: ServerlessSpec<'a>,
}

#[derive(Serialize)]
struct ServerlessSpec<'a> {
    cloud: &'a str,
    region: &'a str,
}

#[derive(Serialize)]
struct UpsertRequest<'a> {
    vectors: &'a [IndexEntry],
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
}

impl PineconeIndex {
    /// Build a client from configuration; the API key comes from the
    /// environment and is only required once a call is made.
    pub fn new(config: &IndexConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            api_key: std::env::var(API_KEY_VAR).ok(),
            config: config.clone(),
            host: OnceCell::new(),
        }
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| Error::Config(format!("{} not set in environment", API_KEY_VAR)))
    }

    /// List the names of existing indexes
    async fn list_indexes(&self) -> Result<Vec<String>> {
        let url = format!("{}/indexes", self.config.control_url);
        let body = self.get_json(&url).await?;

        let names = body
            .get("indexes")
            .and_then(|v| v.as_array())
            .map(|indexes| {
                indexes
                    .iter()
                    .filter_map(|i| i.get("name").and_then(|n| n.as_str()))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(names)
    }

    /// Resolve and cache the index's data-plane host
    async fn host(&self) -> Result<&str> {
        let host = self
            .host
            .get_or_try_init(|| async {
                let url = format!("{}/indexes/{}", self.config.control_url, self.config.name);
                let body = self.get_json(&url).await?;
                body.get("host")
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
                    .ok_or_else(|| {
                        Error::index(format!(
                            "describe response for '{}' has no host",
                            self.config.name
                        ))
                    })
            })
            .await?;
        Ok(host)
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self
            .client
            .get(url)
            .header("Api-Key", self.api_key()?)
            .send()
            .await
            .map_err(|e| Error::index(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::index(format!("HTTP {} - {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| Error::index(format!("unexpected response: {}", e)))
    }

    async fn post_json<T: Serialize>(&self, url: &str, request: &T) -> Result<Value> {
        let response = self
            .client
            .post(url)
            .header("Api-Key", self.api_key()?)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::index(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::index(format!("HTTP {} - {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| Error::index(format!("unexpected response: {}", e)))
    }
}

#[async_trait]
impl VectorIndexProvider for PineconeIndex {
    fn ensure_configured(&self) -> Result<()> {
        self.api_key().map(|_| ())
    }

    async fn ensure_index(&self, dimension: usize) -> Result<()> {
        let existing = self.list_indexes().await?;
        if existing.iter().any(|name| name == &self.config.name) {
            return Ok(());
        }

        tracing::info!(
            index = %self.config.name,
            dimension,
            "creating vector index"
        );

        let url = format!("{}/indexes", self.config.control_url);
        let request = CreateIndexRequest {
            name: &self.config.name,
            dimension,
            metric: "cosine",
            spec: CreateIndexSpec {
                serverless: ServerlessSpec {
                    cloud: &self.config.cloud,
                    region: &self.config.region,
                },
            },
        };
        self.post_json(&url, &request).await?;
        Ok(())
    }

    async fn upsert(&self, entries: &[IndexEntry], namespace: Option<&str>) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let host = self.host().await?;
        let url = format!("https://{}/vectors/upsert", host);
        let request = UpsertRequest {
            vectors: entries,
            namespace,
        };
        self.post_json(&url, &request).await?;

        tracing::debug!(
            count = entries.len(),
            namespace = namespace.unwrap_or("(global)"),
            "upserted vectors"
        );
        Ok(())
    }

    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        namespace: Option<&str>,
    ) -> Result<Vec<IndexMatch>> {
        let host = self.host().await?;
        let url = format!("https://{}/query", host);
        let request = QueryRequest {
            vector,
            top_k,
            include_metadata: true,
            namespace,
        };

        let body = self.post_json(&url, &request).await?;
        Ok(normalize_matches(&body))
    }

    fn name(&self) -> &str {
        "pinecone"
    }
}

/// Normalize a query response into [`IndexMatch`] records.
///
/// Current responses carry a top-level `matches` array; older multi-query
/// responses nest it under `results[0].matches`. Entries missing an id or
/// score are dropped here rather than surfacing half-formed matches.
fn normalize_matches(body: &Value) -> Vec<IndexMatch> {
    let matches = body
        .get("matches")
        .and_then(|v| v.as_array())
        .or_else(|| {
            body.get("results")
                .and_then(|r| r.as_array())
                .and_then(|r| r.first())
                .and_then(|r| r.get("matches"))
                .and_then(|v| v.as_array())
        });

    let Some(matches) = matches else {
        return Vec::new();
    };

    matches
        .iter()
        .filter_map(|m| {
            let id = m.get("id").and_then(|v| v.as_str())?.to_string();
            let score = m.get("score").and_then(|v| v.as_f64())? as f32;
            let metadata = m
                .get("metadata")
                .and_then(|v| v.as_object())
                .map(|obj| {
                    obj.iter()
                        .map(|(k, v)| (k.clone(), v.clone()))
                        .collect::<HashMap<_, _>>()
                });
            Some(IndexMatch {
                id,
                score,
                metadata,
            })
        })
        .collect()
}
