use async_trait::async_trait;
use pgvector::Vector;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug)]
pub enum ChunkRepositoryError {
    DatabaseError(String),
}

impl std::fmt::Display for ChunkRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChunkRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for ChunkRepositoryError {}

/// One nearest-neighbor hit. The score keeps full precision here; rounding
/// happens only at the display layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredChunk {
    pub chunk_id: Uuid,
    pub document_id: Uuid,
    pub document_filename: String,
    pub chunk_index: i32,
    pub chunk_text: String,
    pub similarity_score: f32,
}

#[async_trait]
pub trait ChunkRepository: Send + Sync {
    /// Nearest-neighbor search restricted to chunks of documents associated
    /// with `bot_id`. Returns at most `top_k` results ordered by descending
    /// similarity, ties broken by ascending chunk id.
    async fn search(
        &self,
        query_vector: &Vector,
        bot_id: Uuid,
        top_k: usize,
    ) -> Result<Vec<ScoredChunk>, ChunkRepositoryError>;

    async fn count_by_document(&self, document_id: Uuid) -> Result<i64, ChunkRepositoryError>;
}
