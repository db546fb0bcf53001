use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Bot;

#[derive(Debug)]
pub enum BotRepositoryError {
    NotFound(Uuid),
    DatabaseError(String),
}

impl std::fmt::Display for BotRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BotRepositoryError::NotFound(id) => write!(f, "Bot not found: {}", id),
            BotRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for BotRepositoryError {}

#[async_trait]
pub trait BotRepository: Send + Sync {
    async fn save(&self, bot: &Bot) -> Result<(), BotRepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Bot>, BotRepositoryError>;

    async fn set_active(&self, id: Uuid, active: bool) -> Result<(), BotRepositoryError>;

    /// Associates a document with the bot. Adding the same pair twice is a
    /// no-op.
    async fn add_document(&self, bot_id: Uuid, document_id: Uuid)
    -> Result<(), BotRepositoryError>;

    async fn remove_document(
        &self,
        bot_id: Uuid,
        document_id: Uuid,
    ) -> Result<bool, BotRepositoryError>;

    async fn document_ids(&self, bot_id: Uuid) -> Result<Vec<Uuid>, BotRepositoryError>;
}
