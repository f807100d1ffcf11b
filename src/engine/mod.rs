//! Search-engine client module
//!
//! Talks to Elasticsearch over its REST API. The client is constructed once
//! at startup, bootstraps the document index, and is shared read-only by the
//! services afterwards.

mod client;
mod wire;

pub use client::{EngineFailure, EsClient};
pub use wire::{EsHit, EsSearchOutcome};
