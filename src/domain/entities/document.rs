use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An ingested document. Immutable after creation: rewriting content means
/// deleting the document (which cascades to its chunks) and re-ingesting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: Uuid,
    filename: String,
    content: String,
    file_type: String,
    created_at: DateTime<Utc>,
}

impl Document {
    pub fn new(filename: String, content: String, file_type: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename,
            content,
            file_type,
            created_at: Utc::now(),
        }
    }

    /// Rebuilds a document from persisted fields, keeping its identity.
    pub fn from_stored(
        id: Uuid,
        filename: String,
        content: String,
        file_type: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            filename,
            content,
            file_type,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn file_type(&self) -> &str {
        &self.file_type
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let document = Document::new(
            "handbook.txt".to_string(),
            "Employees may work remotely on Fridays.".to_string(),
            "txt".to_string(),
        );

        assert_eq!(document.filename(), "handbook.txt");
        assert_eq!(document.file_type(), "txt");
        assert!(!document.content().is_empty());
    }

    #[test]
    fn test_from_stored_preserves_identity() {
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        let document = Document::from_stored(
            id,
            "notes.txt".to_string(),
            "content".to_string(),
            "txt".to_string(),
            created_at,
        );

        assert_eq!(document.id(), id);
        assert_eq!(document.created_at(), created_at);
    }
}
