//! DocSearch-RS: a document indexing and search service with LLM-assisted
//! answers, written in Rust.
//!
//! A thin HTTP façade over Elasticsearch and an OpenAI-compatible completion
//! API: documents go in, relevance-ranked results come out, and the top hits
//! can be summarized into a single answer.

pub mod config;
pub mod engine;
pub mod error;
pub mod llm;
pub mod models;
pub mod services;
pub mod web;

pub use config::Settings;
pub use error::ApiError;
pub use models::{Document, SearchHit, SearchRequest, SearchResults};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
