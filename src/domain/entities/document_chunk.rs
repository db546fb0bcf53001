use chrono::{DateTime, Utc};
use pgvector::Vector;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One retrievable span of a document. Chunks are append-only: once written
/// they are never mutated, only deleted together with their document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentChunk {
    id: Uuid,
    document_id: Uuid,
    chunk_text: String,
    chunk_index: i32,
    embedding: Vector,
    created_at: DateTime<Utc>,
}

impl DocumentChunk {
    pub fn new(document_id: Uuid, chunk_text: String, chunk_index: i32, embedding: Vector) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id,
            chunk_text,
            chunk_index,
            embedding,
            created_at: Utc::now(),
        }
    }

    pub fn from_stored(
        id: Uuid,
        document_id: Uuid,
        chunk_text: String,
        chunk_index: i32,
        embedding: Vector,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            document_id,
            chunk_text,
            chunk_index,
            embedding,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn document_id(&self) -> Uuid {
        self.document_id
    }

    pub fn chunk_text(&self) -> &str {
        &self.chunk_text
    }

    pub fn chunk_index(&self) -> i32 {
        self.chunk_index
    }

    pub fn embedding(&self) -> &Vector {
        &self.embedding
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn embedding_dimension(&self) -> usize {
        self.embedding.as_slice().len()
    }
}
