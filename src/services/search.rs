//! Relevance search over the document index

use crate::config::SearchSettings;
use crate::engine::EsClient;
use crate::error::ApiError;
use crate::models::{SearchHit, SearchRequest, SearchResults};
use std::sync::Arc;
use tracing::debug;

/// Runs relevance queries against the engine and shapes the results.
pub struct SearchService {
    engine: Arc<EsClient>,
    default_max_results: u32,
}

impl SearchService {
    pub fn new(engine: Arc<EsClient>, settings: &SearchSettings) -> Self {
        Self {
            engine,
            default_max_results: settings.max_results,
        }
    }

    /// Run a relevance query. The caller's `max_results` is used as given —
    /// the configured value is only a default for when the field is omitted,
    /// not a ceiling. Results come back in the engine's order (descending
    /// score; tie order is implementation-defined) and `total` is the
    /// engine's match count, which can exceed the number of results.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResults, ApiError> {
        if request.query.trim().is_empty() {
            return Err(ApiError::Validation(
                "query must not be empty".to_string(),
            ));
        }
        let size = match request.max_results {
            Some(0) => {
                return Err(ApiError::Validation(
                    "max_results must be a positive integer".to_string(),
                ))
            }
            Some(n) => n,
            None => self.default_max_results,
        };

        debug!("searching '{}' (size {})", request.query, size);
        let outcome = self.engine.search(&request.query, size).await?;

        let results = outcome
            .hits
            .into_iter()
            .map(|hit| SearchHit {
                document_id: hit.id,
                text: hit.text,
                score: hit.score,
            })
            .collect();
        Ok(SearchResults {
            results,
            total: outcome.total,
        })
    }
}
