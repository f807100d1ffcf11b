//! Service layer
//!
//! Thin services sitting between the HTTP handlers and the upstream clients.
//! Validation happens here, before any upstream call; upstream failures are
//! translated into the external taxonomy at this boundary.

mod documents;
mod search;
mod summarize;

pub use documents::DocumentService;
pub use search::SearchService;
pub use summarize::{AnswerService, NO_RESULTS_ANSWER};
