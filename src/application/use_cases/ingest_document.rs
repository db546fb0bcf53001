use std::sync::Arc;
use uuid::Uuid;

use crate::application::services::DocumentIngestService;
use crate::application::services::ingestion::IngestError;

#[derive(Debug, Clone)]
pub struct IngestDocumentRequest {
    pub filename: String,
    pub text: String,
    pub file_type: String,
}

#[derive(Debug, Clone)]
pub struct IngestDocumentResponse {
    pub document_id: Uuid,
    pub chunk_count: usize,
}

pub struct IngestDocumentUseCase {
    ingest_service: Arc<DocumentIngestService>,
}

impl IngestDocumentUseCase {
    pub fn new(ingest_service: Arc<DocumentIngestService>) -> Self {
        Self { ingest_service }
    }

    pub async fn execute(
        &self,
        request: IngestDocumentRequest,
    ) -> Result<IngestDocumentResponse, IngestError> {
        let receipt = self
            .ingest_service
            .ingest(&request.filename, &request.text, &request.file_type)
            .await?;

        Ok(IngestDocumentResponse {
            document_id: receipt.document_id,
            chunk_count: receipt.chunk_count,
        })
    }
}
