use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::{Document, DocumentChunk};
use crate::domain::repositories::document_repository::{
    DocumentRepository, DocumentRepositoryError,
};
use crate::infrastructure::database::models::{
    DocumentModel, NewDocumentChunkModel, NewDocumentModel,
};
use crate::infrastructure::database::schema::{document_chunks, documents};
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresDocumentRepository {
    pool: DbPool,
}

impl PostgresDocumentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentRepository for PostgresDocumentRepository {
    async fn save_with_chunks(
        &self,
        document: &Document,
        chunks: &[DocumentChunk],
    ) -> Result<(), DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let new_document = NewDocumentModel::from(document);
        let new_chunks: Vec<NewDocumentChunkModel> =
            chunks.iter().map(NewDocumentChunkModel::from).collect();

        // Document and chunk rows land together or not at all; a document is
        // never visible with a partial chunk set.
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::insert_into(documents::table)
                .values(&new_document)
                .execute(conn)?;

            diesel::insert_into(document_chunks::table)
                .values(&new_chunks)
                .execute(conn)?;

            Ok(())
        })
        .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let result = documents::table
            .find(id)
            .first::<DocumentModel>(&mut conn)
            .optional()
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.map(Document::from))
    }

    async fn list(&self) -> Result<Vec<Document>, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let models = documents::table
            .order(documents::created_at.desc())
            .load::<DocumentModel>(&mut conn)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(models.into_iter().map(Document::from).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        // Chunks and bot associations cascade at the database level.
        let deleted_count = diesel::delete(documents::table.find(id))
            .execute(&mut conn)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(deleted_count > 0)
    }
}
