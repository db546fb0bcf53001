use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{Document, DocumentChunk};

#[derive(Debug)]
pub enum DocumentRepositoryError {
    DatabaseError(String),
    ValidationError(String),
}

impl std::fmt::Display for DocumentRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            DocumentRepositoryError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for DocumentRepositoryError {}

#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Writes the document row and its full chunk batch as one atomic unit.
    /// A failure rolls the whole document back; a document is never visible
    /// with a partial chunk set.
    async fn save_with_chunks(
        &self,
        document: &Document,
        chunks: &[DocumentChunk],
    ) -> Result<(), DocumentRepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, DocumentRepositoryError>;

    async fn list(&self) -> Result<Vec<Document>, DocumentRepositoryError>;

    /// Deletes the document; chunks and bot associations cascade.
    async fn delete(&self, id: Uuid) -> Result<bool, DocumentRepositoryError>;
}
