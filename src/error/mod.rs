//! External error taxonomy
//!
//! Every upstream failure is translated here, at one place, into a closed set
//! of error kinds with an HTTP status, a machine-readable kind tag, and the
//! original upstream message kept for diagnostics. Handlers never see raw
//! reqwest or engine errors.

use crate::engine::EngineFailure;
use crate::llm::LlmFailure;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Uniform external error kinds surfaced by the API.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// Inbound payload malformed; rejected before any upstream call
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Lookup miss reported by the search engine
    #[error("Document not found: {0}")]
    NotFound(String),

    /// Search engine unreachable
    #[error("Search engine connection failed: {0}")]
    Connectivity(String),

    /// Search engine rejected our credentials
    #[error("Search engine authentication failed: {0}")]
    Auth(String),

    /// Engine-side fault or malformed engine exchange
    #[error("Search engine error: {message}")]
    Engine {
        message: String,
        upstream_status: Option<u16>,
    },

    /// Completion-provider failure of any flavor
    #[error("Completion provider error: {message}")]
    Dependency {
        message: String,
        upstream_status: Option<u16>,
    },

    /// Anything unclassified
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Machine-readable kind tag included in every error body
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::NotFound(_) => "not_found",
            Self::Connectivity(_) => "connectivity_error",
            Self::Auth(_) => "auth_error",
            Self::Engine { .. } => "engine_error",
            Self::Dependency { .. } => "dependency_error",
            Self::Internal(_) => "internal_error",
        }
    }

    /// HTTP status the kind maps to
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Connectivity(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
            Self::Engine { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Dependency { .. } => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Status code reported by the upstream service, when one was seen
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Engine {
                upstream_status, ..
            }
            | Self::Dependency {
                upstream_status, ..
            } => *upstream_status,
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(kind = self.kind(), "request failed: {}", self);
        } else {
            tracing::debug!(kind = self.kind(), "request rejected: {}", self);
        }
        let mut body = json!({
            "error": self.to_string(),
            "kind": self.kind(),
        });
        if let Some(code) = self.upstream_status() {
            body["upstream_status"] = json!(code);
        }
        (status, Json(body)).into_response()
    }
}

/// Translation table for search-engine failures:
/// unreachable transport -> Connectivity, rejected credentials -> Auth,
/// everything else the engine did wrong -> Engine with the upstream status.
impl From<EngineFailure> for ApiError {
    fn from(failure: EngineFailure) -> Self {
        match failure {
            EngineFailure::Transport(e) if e.is_connect() || e.is_timeout() => {
                Self::Connectivity(e.to_string())
            }
            EngineFailure::Transport(e) => Self::Engine {
                message: e.to_string(),
                upstream_status: None,
            },
            EngineFailure::Status { code, body } if code == 401 || code == 403 => {
                Self::Auth(format!("status {}: {}", code, body))
            }
            EngineFailure::Status { code, body } => Self::Engine {
                message: format!("status {}: {}", code, body),
                upstream_status: Some(code),
            },
            EngineFailure::Decode(message) => Self::Engine {
                message,
                upstream_status: None,
            },
        }
    }
}

/// Every completion-provider failure maps to Dependency; auth, rate limits
/// and connectivity are not distinguished for the caller.
impl From<LlmFailure> for ApiError {
    fn from(failure: LlmFailure) -> Self {
        let upstream_status = failure.upstream_status();
        Self::Dependency {
            message: failure.to_string(),
            upstream_status,
        }
    }
}
