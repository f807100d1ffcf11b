//! Completion-provider client module
//!
//! Wraps an OpenAI-compatible chat-completion API. One call per request, no
//! retries; failures are surfaced to the error layer untouched.

mod client;

pub use client::{LlmClient, LlmFailure};
