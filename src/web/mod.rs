//! Web server module
//!
//! Provides the HTTP API for DocSearch-RS.

mod extract;
mod handlers;
mod routes;
mod state;

pub use extract::ValidatedJson;
pub use routes::create_router;
pub use state::AppState;
