//! HTTP client for the Elasticsearch REST API

use super::wire::{DocFetched, EsHit, EsSearchOutcome, IndexCreated, SearchBody};
use crate::config::EngineSettings;
use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Low-level failure modes of an engine exchange. Translation into the
/// external taxonomy happens in `crate::error`, not here.
#[derive(Debug, Error)]
pub enum EngineFailure {
    #[error("engine transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("engine returned status {code}: {body}")]
    Status { code: u16, body: String },

    #[error("unexpected engine response: {0}")]
    Decode(String),
}

/// Elasticsearch client bound to a single index. Cheap to clone is not a
/// goal; it lives behind an `Arc` in the application state and is injected
/// into the services that need it.
pub struct EsClient {
    http: Client,
    base_url: url::Url,
    index: String,
    username: Option<String>,
    password: Option<String>,
}

impl EsClient {
    /// Build a client from settings without touching the network.
    pub fn new(settings: &EngineSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(settings.request_timeout())
            .connect_timeout(settings.connect_timeout())
            .gzip(true)
            .build()
            .context("failed to build engine HTTP client")?;

        let base_url = url::Url::parse(&settings.base_url())
            .with_context(|| format!("invalid engine URL: {}", settings.base_url()))?;

        Ok(Self {
            http,
            base_url,
            index: settings.index.clone(),
            username: settings.username.clone(),
            password: settings.password.clone(),
        })
    }

    /// Build a client, wait for the engine to answer a ping (retrying per
    /// settings), and make sure the document index exists.
    pub async fn connect(settings: &EngineSettings) -> Result<Self> {
        let client = Self::new(settings)?;
        client
            .ping_with_retries(settings.max_retries, settings.retry_delay())
            .await
            .with_context(|| {
                format!("search engine unreachable at {}", settings.base_url())
            })?;
        client.ensure_index().await?;
        Ok(client)
    }

    async fn ping_with_retries(
        &self,
        max_retries: u32,
        delay: std::time::Duration,
    ) -> Result<(), EngineFailure> {
        let mut attempt = 0;
        loop {
            match self.ping().await {
                Ok(()) => return Ok(()),
                Err(e) if attempt < max_retries => {
                    attempt += 1;
                    warn!(
                        "engine ping failed (attempt {}/{}): {}",
                        attempt, max_retries, e
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn ping(&self) -> Result<(), EngineFailure> {
        let response = self.send(self.http.get(self.base_url.clone())).await?;
        Self::require_success(response).await?;
        Ok(())
    }

    /// Create the index with a minimal full-text mapping if it does not
    /// exist yet. Concurrent bootstraps race on the create; the engine's
    /// "already exists" rejection is treated as success.
    pub async fn ensure_index(&self) -> Result<(), EngineFailure> {
        let index_url = self.url(&self.index)?;

        let head = self.send(self.http.head(index_url.clone())).await?;
        if head.status().is_success() {
            debug!("index '{}' already exists", self.index);
            return Ok(());
        }
        if head.status() != StatusCode::NOT_FOUND {
            return Err(Self::status_failure(head).await);
        }

        let mapping = json!({
            "mappings": {
                "properties": {
                    "text": {"type": "text"}
                }
            }
        });
        let response = self.send(self.http.put(index_url).json(&mapping)).await?;
        if response.status().is_success() {
            info!("created index '{}'", self.index);
            return Ok(());
        }

        let code = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        if code == 400 && body.contains("resource_already_exists_exception") {
            debug!("index '{}' created concurrently", self.index);
            return Ok(());
        }
        Err(EngineFailure::Status { code, body })
    }

    /// Index one document and return the engine-assigned id.
    pub async fn index_document(&self, text: &str) -> Result<String, EngineFailure> {
        let url = self.url(&format!("{}/_doc", self.index))?;
        let body = json!({"text": text});
        let refresh = [("refresh", "true")];

        let response = self
            .send(self.http.post(url).query(&refresh).json(&body))
            .await?;
        let response = Self::require_success(response).await?;
        let created: IndexCreated = response
            .json()
            .await
            .map_err(|e| EngineFailure::Decode(format!("bad index response: {}", e)))?;
        debug!("indexed document {}", created.id);
        Ok(created.id)
    }

    /// Fetch one document by id. `Ok(None)` when the engine has no such id.
    pub async fn get_document(&self, id: &str) -> Result<Option<(String, String)>, EngineFailure> {
        let url = self.url(&format!("{}/_doc/{}", self.index, id))?;

        let response = self.send(self.http.get(url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::require_success(response).await?;
        let fetched: DocFetched = response
            .json()
            .await
            .map_err(|e| EngineFailure::Decode(format!("bad get response: {}", e)))?;
        let source = fetched
            .source
            .ok_or_else(|| EngineFailure::Decode("document has no source".to_string()))?;
        Ok(Some((fetched.id, source.text)))
    }

    /// Run a relevance (`match`) query over the text field, capped at `size`
    /// hits. Hits come back in the engine's order: descending score, ties
    /// broken however the engine pleases.
    pub async fn search(&self, query: &str, size: u32) -> Result<EsSearchOutcome, EngineFailure> {
        let url = self.url(&format!("{}/_search", self.index))?;
        let body = json!({
            "query": {
                "match": {
                    "text": query
                }
            },
            "size": size
        });

        let response = self.send(self.http.post(url).json(&body)).await?;
        let response = Self::require_success(response).await?;
        let parsed: SearchBody = response
            .json()
            .await
            .map_err(|e| EngineFailure::Decode(format!("bad search response: {}", e)))?;

        let hits = parsed
            .hits
            .hits
            .into_iter()
            .map(|hit| EsHit {
                id: hit.id,
                text: hit.source.text,
                score: hit.score.unwrap_or(0.0),
            })
            .collect();
        Ok(EsSearchOutcome {
            hits,
            total: parsed.hits.total.value,
        })
    }

    fn url(&self, path: &str) -> Result<url::Url, EngineFailure> {
        self.base_url
            .join(path)
            .map_err(|e| EngineFailure::Decode(format!("bad engine path '{}': {}", path, e)))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, EngineFailure> {
        let request = match (&self.username, &self.password) {
            (Some(user), password) => request.basic_auth(user, password.as_deref()),
            _ => request,
        };
        Ok(request.send().await?)
    }

    async fn require_success(response: Response) -> Result<Response, EngineFailure> {
        if response.status().is_success() {
            return Ok(response);
        }
        Err(Self::status_failure(response).await)
    }

    async fn status_failure(response: Response) -> EngineFailure {
        let code = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        EngineFailure::Status { code, body }
    }
}
