//! Data model shared between the HTTP surface and the service layer.

use serde::{Deserialize, Serialize};

/// A stored document. The id is assigned by the search engine at creation
/// time; documents are never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub document_id: String,
    pub text: String,
}

/// Request body for document creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDocumentRequest {
    pub text: String,
}

/// A single search match with the engine-assigned relevance score
/// (engine-defined scale, higher is more relevant).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    pub document_id: String,
    pub text: String,
    pub score: f64,
}

/// A relevance query. When `max_results` is unset the configured default
/// result count applies.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub max_results: Option<u32>,
}

/// Search outcome: hits in descending score order plus the engine's total
/// match count, which may exceed `results.len()` when the size is capped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub results: Vec<SearchHit>,
    pub total: u64,
}

/// Response body for the LLM-assisted search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub answer: String,
}
