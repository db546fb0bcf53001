use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::application::ports::EmbeddingProvider;
use crate::application::services::Segmenter;
use crate::domain::entities::{Document, DocumentChunk};
use crate::domain::repositories::DocumentRepository;

#[derive(Debug)]
pub enum IngestError {
    ValidationError(String),
    EmbeddingError(String),
    RepositoryError(String),
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            IngestError::EmbeddingError(msg) => write!(f, "Embedding error: {}", msg),
            IngestError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for IngestError {}

#[derive(Debug, Clone)]
pub struct IngestReceipt {
    pub document_id: Uuid,
    pub chunk_count: usize,
}

/// Write path: segment extracted text, embed every span in one batch, then
/// persist document + chunks atomically. Embedding happens before any write,
/// so a failed batch leaves nothing behind — partial chunk sets are never
/// acceptable.
pub struct DocumentIngestService {
    segmenter: Segmenter,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    document_repository: Arc<dyn DocumentRepository>,
    embedding_dimension: usize,
}

impl DocumentIngestService {
    pub fn new(
        segmenter: Segmenter,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        document_repository: Arc<dyn DocumentRepository>,
        embedding_dimension: usize,
    ) -> Self {
        Self {
            segmenter,
            embedding_provider,
            document_repository,
            embedding_dimension,
        }
    }

    /// Caller supplies already-extracted plain text; no format-specific
    /// extraction happens here.
    pub async fn ingest(
        &self,
        filename: &str,
        text: &str,
        file_type: &str,
    ) -> Result<IngestReceipt, IngestError> {
        if filename.trim().is_empty() {
            return Err(IngestError::ValidationError(
                "Filename cannot be empty".to_string(),
            ));
        }

        if text.trim().is_empty() {
            return Err(IngestError::ValidationError(
                "Document text cannot be empty".to_string(),
            ));
        }

        let document = Document::new(
            filename.to_string(),
            text.to_string(),
            file_type.to_string(),
        );

        let spans = self.segmenter.segment(text);

        let embeddings = self
            .embedding_provider
            .embed_batch(&spans)
            .await
            .map_err(|e| IngestError::EmbeddingError(e.to_string()))?;

        if embeddings.len() != spans.len() {
            return Err(IngestError::EmbeddingError(format!(
                "Embedding batch returned {} vectors for {} spans",
                embeddings.len(),
                spans.len()
            )));
        }

        // Dense indices 0..N-1, one chunk per span.
        let mut chunks = Vec::with_capacity(spans.len());
        for (index, (span, embedding)) in spans.into_iter().zip(embeddings).enumerate() {
            let dimension = embedding.as_slice().len();
            if dimension != self.embedding_dimension {
                return Err(IngestError::EmbeddingError(format!(
                    "Embedding dimension {} does not match configured dimension {}",
                    dimension, self.embedding_dimension
                )));
            }

            chunks.push(DocumentChunk::new(
                document.id(),
                span,
                index as i32,
                embedding,
            ));
        }

        self.document_repository
            .save_with_chunks(&document, &chunks)
            .await
            .map_err(|e| IngestError::RepositoryError(e.to_string()))?;

        info!(
            document_id = %document.id(),
            chunk_count = chunks.len(),
            filename,
            "ingested document"
        );

        Ok(IngestReceipt {
            document_id: document.id(),
            chunk_count: chunks.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pgvector::Vector;
    use std::sync::Mutex;

    use crate::application::ports::embedding_provider::EmbeddingProviderError;
    use crate::domain::repositories::document_repository::DocumentRepositoryError;

    struct StubEmbeddingProvider {
        dimension: usize,
        fail: bool,
    }

    #[async_trait]
    impl EmbeddingProvider for StubEmbeddingProvider {
        async fn embed(&self, _text: &str) -> Result<Vector, EmbeddingProviderError> {
            Ok(Vector::from(vec![0.0; self.dimension]))
        }

        async fn embed_batch(
            &self,
            texts: &[String],
        ) -> Result<Vec<Vector>, EmbeddingProviderError> {
            if self.fail {
                return Err(EmbeddingProviderError::ServiceUnavailable);
            }
            Ok(texts
                .iter()
                .map(|_| Vector::from(vec![0.0; self.dimension]))
                .collect())
        }

        fn embedding_dimension(&self) -> usize {
            self.dimension
        }
    }

    #[derive(Default)]
    struct RecordingDocumentRepository {
        saved: Mutex<Vec<(Document, Vec<DocumentChunk>)>>,
    }

    #[async_trait]
    impl DocumentRepository for RecordingDocumentRepository {
        async fn save_with_chunks(
            &self,
            document: &Document,
            chunks: &[DocumentChunk],
        ) -> Result<(), DocumentRepositoryError> {
            self.saved
                .lock()
                .unwrap()
                .push((document.clone(), chunks.to_vec()));
            Ok(())
        }

        async fn find_by_id(
            &self,
            _id: Uuid,
        ) -> Result<Option<Document>, DocumentRepositoryError> {
            Ok(None)
        }

        async fn list(&self) -> Result<Vec<Document>, DocumentRepositoryError> {
            Ok(Vec::new())
        }

        async fn delete(&self, _id: Uuid) -> Result<bool, DocumentRepositoryError> {
            Ok(false)
        }
    }

    fn service(
        repository: Arc<RecordingDocumentRepository>,
        fail_embedding: bool,
    ) -> DocumentIngestService {
        DocumentIngestService::new(
            Segmenter::new(100, 20).unwrap(),
            Arc::new(StubEmbeddingProvider {
                dimension: 3,
                fail: fail_embedding,
            }),
            repository,
            3,
        )
    }

    #[tokio::test]
    async fn test_ingest_assigns_dense_chunk_indices() {
        let repository = Arc::new(RecordingDocumentRepository::default());
        let text = "This is a sentence. ".repeat(20);

        let receipt = service(repository.clone(), false)
            .ingest("notes.txt", &text, "txt")
            .await
            .unwrap();

        let saved = repository.saved.lock().unwrap();
        let (document, chunks) = &saved[0];
        assert_eq!(document.id(), receipt.document_id);
        assert_eq!(chunks.len(), receipt.chunk_count);

        let indices: Vec<i32> = chunks.iter().map(|c| c.chunk_index()).collect();
        let expected: Vec<i32> = (0..chunks.len() as i32).collect();
        assert_eq!(indices, expected);
    }

    #[tokio::test]
    async fn test_embedding_failure_persists_nothing() {
        let repository = Arc::new(RecordingDocumentRepository::default());

        let result = service(repository.clone(), true)
            .ingest("notes.txt", "Some content to ingest.", "txt")
            .await;

        assert!(matches!(result, Err(IngestError::EmbeddingError(_))));
        assert!(repository.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_text_rejected() {
        let repository = Arc::new(RecordingDocumentRepository::default());

        let result = service(repository.clone(), false)
            .ingest("notes.txt", "   ", "txt")
            .await;

        assert!(matches!(result, Err(IngestError::ValidationError(_))));
        assert!(repository.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dimension_mismatch_rejected() {
        let repository = Arc::new(RecordingDocumentRepository::default());
        let service = DocumentIngestService::new(
            Segmenter::new(100, 20).unwrap(),
            Arc::new(StubEmbeddingProvider {
                dimension: 3,
                fail: false,
            }),
            repository.clone(),
            // Configured store dimension disagrees with the provider.
            4,
        );

        let result = service.ingest("notes.txt", "Some content.", "txt").await;

        assert!(matches!(result, Err(IngestError::EmbeddingError(_))));
        assert!(repository.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_short_document_yields_single_chunk() {
        let repository = Arc::new(RecordingDocumentRepository::default());

        let receipt = service(repository.clone(), false)
            .ingest("short.txt", "Tiny document.", "txt")
            .await
            .unwrap();

        assert_eq!(receipt.chunk_count, 1);
        let saved = repository.saved.lock().unwrap();
        assert_eq!(saved[0].1[0].chunk_text(), "Tiny document.");
    }
}
