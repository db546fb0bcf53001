use async_trait::async_trait;
use pgvector::Vector;
use uuid::Uuid;

use diesel::prelude::*;

use crate::domain::ranking::{self, ChunkCandidate};
use crate::domain::repositories::chunk_repository::{
    ChunkRepository, ChunkRepositoryError, ScoredChunk,
};
use crate::infrastructure::database::models::DocumentChunkModel;
use crate::infrastructure::database::schema::{bot_documents, document_chunks, documents};
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresChunkRepository {
    pool: DbPool,
}

impl PostgresChunkRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChunkRepository for PostgresChunkRepository {
    async fn search(
        &self,
        query_vector: &Vector,
        bot_id: Uuid,
        top_k: usize,
    ) -> Result<Vec<ScoredChunk>, ChunkRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))?;

        // The join through bot_documents is what keeps tenant scoping
        // leak-proof: only chunks of associated documents are candidates.
        let rows: Vec<(DocumentChunkModel, String)> = document_chunks::table
            .inner_join(documents::table.inner_join(bot_documents::table))
            .filter(bot_documents::bot_id.eq(bot_id))
            .select((DocumentChunkModel::as_select(), documents::filename))
            .load(&mut conn)
            .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))?;

        let candidates: Vec<ChunkCandidate> = rows
            .into_iter()
            .map(|(model, filename)| ChunkCandidate {
                chunk_id: model.id,
                document_id: model.document_id,
                document_filename: filename,
                chunk_index: model.chunk_index,
                chunk_text: model.chunk_text,
                embedding: model.embedding,
            })
            .collect();

        Ok(ranking::rank(query_vector, candidates, top_k))
    }

    async fn count_by_document(&self, document_id: Uuid) -> Result<i64, ChunkRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))?;

        document_chunks::table
            .filter(document_chunks::document_id.eq(document_id))
            .count()
            .get_result(&mut conn)
            .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))
    }
}
