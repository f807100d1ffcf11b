//! Application state shared across handlers

use crate::config::Settings;
use crate::engine::EsClient;
use crate::llm::LlmClient;
use crate::services::{AnswerService, DocumentService, SearchService};
use std::sync::Arc;

/// Shared application state. Built once at startup, read-only afterwards;
/// the clients are injected so tests can point them at doubles.
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Document create/fetch
    pub documents: Arc<DocumentService>,
    /// Relevance search
    pub search: Arc<SearchService>,
    /// LLM-assisted search
    pub answers: Arc<AnswerService>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, engine: EsClient, llm: LlmClient) -> Self {
        let settings = Arc::new(settings);
        let engine = Arc::new(engine);
        let llm = Arc::new(llm);

        let documents = Arc::new(DocumentService::new(engine.clone()));
        let search = Arc::new(SearchService::new(engine, &settings.search));
        let answers = Arc::new(AnswerService::new(search.clone(), llm));

        Self {
            settings,
            documents,
            search,
            answers,
        }
    }
}
