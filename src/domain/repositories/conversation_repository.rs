use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{Conversation, Turn};

#[derive(Debug)]
pub enum ConversationRepositoryError {
    WrongBot {
        conversation_id: Uuid,
        bot_id: Uuid,
    },
    DatabaseError(String),
}

impl std::fmt::Display for ConversationRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversationRepositoryError::WrongBot {
                conversation_id,
                bot_id,
            } => {
                write!(
                    f,
                    "Conversation {} does not belong to bot {}",
                    conversation_id, bot_id
                )
            }
            ConversationRepositoryError::DatabaseError(msg) => {
                write!(f, "Database error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConversationRepositoryError {}

#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Returns the conversation with this id, creating it for `bot_id` if it
    /// does not exist yet. Idempotent per conversation id. An existing
    /// conversation owned by a different bot is `WrongBot`, never returned.
    async fn get_or_create(
        &self,
        id: Uuid,
        bot_id: Uuid,
    ) -> Result<Conversation, ConversationRepositoryError>;

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Conversation>, ConversationRepositoryError>;

    /// Persists one turn as a single unit.
    async fn save_turn(&self, turn: &Turn) -> Result<(), ConversationRepositoryError>;

    /// Most recent `limit` turns, returned in chronological order.
    async fn history(
        &self,
        conversation_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Turn>, ConversationRepositoryError>;
}
