//! Document create/fetch operations

use crate::engine::EsClient;
use crate::error::ApiError;
use crate::models::Document;
use std::sync::Arc;
use tracing::info;

/// Create and fetch single documents by id. Documents are immutable; there
/// is no update or delete.
pub struct DocumentService {
    engine: Arc<EsClient>,
}

impl DocumentService {
    pub fn new(engine: Arc<EsClient>) -> Self {
        Self { engine }
    }

    /// Index one document and return it with the engine-assigned id.
    /// Empty or whitespace-only text is rejected before any upstream call.
    pub async fn create(&self, text: String) -> Result<Document, ApiError> {
        if text.trim().is_empty() {
            return Err(ApiError::Validation(
                "document text must not be empty".to_string(),
            ));
        }
        let document_id = self.engine.index_document(&text).await?;
        info!("created document {}", document_id);
        Ok(Document { document_id, text })
    }

    /// Fetch a document by id; a lookup miss is NotFound, never some other
    /// error kind.
    pub async fn get(&self, id: &str) -> Result<Document, ApiError> {
        match self.engine.get_document(id).await? {
            Some((document_id, text)) => Ok(Document { document_id, text }),
            None => Err(ApiError::NotFound(id.to_string())),
        }
    }
}
