use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::Document;
use crate::infrastructure::database::schema::documents;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DocumentModel {
    pub id: Uuid,
    pub filename: String,
    pub content: String,
    pub file_type: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewDocumentModel {
    pub id: Uuid,
    pub filename: String,
    pub content: String,
    pub file_type: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Document> for NewDocumentModel {
    fn from(document: &Document) -> Self {
        Self {
            id: document.id(),
            filename: document.filename().to_string(),
            content: document.content().to_string(),
            file_type: document.file_type().to_string(),
            created_at: document.created_at(),
        }
    }
}

impl From<DocumentModel> for Document {
    fn from(model: DocumentModel) -> Self {
        Document::from_stored(
            model.id,
            model.filename,
            model.content,
            model.file_type,
            model.created_at,
        )
    }
}
