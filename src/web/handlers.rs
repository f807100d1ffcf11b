//! HTTP request handlers

use super::extract::ValidatedJson;
use super::state::AppState;
use crate::error::ApiError;
use crate::models::{
    AnswerResponse, CreateDocumentRequest, Document, SearchRequest, SearchResults,
};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

/// Create a document; the engine assigns the id.
pub async fn create_document(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateDocumentRequest>,
) -> Result<Json<Document>, ApiError> {
    let document = state.documents.create(request.text).await?;
    Ok(Json(document))
}

/// Fetch a document by id.
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>, ApiError> {
    let document = state.documents.get(&id).await?;
    Ok(Json(document))
}

/// Relevance search over the document index.
pub async fn search(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SearchRequest>,
) -> Result<Json<SearchResults>, ApiError> {
    let results = state.search.search(&request).await?;
    Ok(Json(results))
}

/// Relevance search followed by one completion call over the top hits.
pub async fn search_llm(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SearchRequest>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let answer = state.answers.answer(&request).await?;
    Ok(Json(AnswerResponse { answer }))
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": crate::VERSION
    }))
}
