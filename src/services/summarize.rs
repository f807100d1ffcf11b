//! LLM-assisted search: answer a question over the top search hits

use super::SearchService;
use crate::error::ApiError;
use crate::llm::LlmClient;
use crate::models::{SearchHit, SearchRequest};
use std::sync::Arc;
use tracing::debug;

/// Fixed answer returned when the search matches nothing; the completion
/// provider is not called in that case.
pub const NO_RESULTS_ANSWER: &str = "No relevant documents found";

/// At most this many hits are handed to the model as context.
const CONTEXT_HITS: usize = 3;

const SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Answer the question based on the provided context.";

/// Composes the search service with one completion call.
pub struct AnswerService {
    search: Arc<SearchService>,
    llm: Arc<LlmClient>,
}

impl AnswerService {
    pub fn new(search: Arc<SearchService>, llm: Arc<LlmClient>) -> Self {
        Self { search, llm }
    }

    /// Search, then ask the model to answer the query from the top hits.
    /// Zero hits short-circuit to the sentinel answer; any provider failure
    /// aborts the request without retry.
    pub async fn answer(&self, request: &SearchRequest) -> Result<String, ApiError> {
        let found = self.search.search(request).await?;
        if found.results.is_empty() {
            debug!("no hits for '{}', skipping completion", request.query);
            return Ok(NO_RESULTS_ANSWER.to_string());
        }

        let context = build_context(&found.results);
        let user_prompt = format!("Context:\n{}\n\nQuestion: {}", context, request.query);
        let answer = self.llm.complete(SYSTEM_PROMPT, &user_prompt).await?;
        Ok(answer)
    }
}

/// Concatenate the top hits as labeled blocks:
/// `Document 1:\n<text>`, blank-line separated.
fn build_context(hits: &[SearchHit]) -> String {
    hits.iter()
        .take(CONTEXT_HITS)
        .enumerate()
        .map(|(i, hit)| format!("Document {}:\n{}", i + 1, hit.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}
