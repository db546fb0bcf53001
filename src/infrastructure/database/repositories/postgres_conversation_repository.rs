use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::{Conversation, Turn};
use crate::domain::repositories::conversation_repository::{
    ConversationRepository, ConversationRepositoryError,
};
use crate::infrastructure::database::models::{
    ConversationModel, NewConversationModel, NewTurnModel, TurnModel,
};
use crate::infrastructure::database::schema::{conversations, turns};
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresConversationRepository {
    pool: DbPool,
}

impl PostgresConversationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationRepository for PostgresConversationRepository {
    async fn get_or_create(
        &self,
        id: Uuid,
        bot_id: Uuid,
    ) -> Result<Conversation, ConversationRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ConversationRepositoryError::DatabaseError(e.to_string()))?;

        let conversation = Conversation::new(id, bot_id);
        let new_conversation = NewConversationModel::from(&conversation);

        // do_nothing keeps creation idempotent per id, including under
        // concurrent turns on the same fresh session.
        diesel::insert_into(conversations::table)
            .values(&new_conversation)
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .map_err(|e| ConversationRepositoryError::DatabaseError(e.to_string()))?;

        let model = conversations::table
            .find(id)
            .first::<ConversationModel>(&mut conn)
            .map_err(|e| ConversationRepositoryError::DatabaseError(e.to_string()))?;

        // A pre-existing conversation may belong to another bot; handing it
        // back would let this bot's turns land in that bot's session.
        if model.bot_id != bot_id {
            return Err(ConversationRepositoryError::WrongBot {
                conversation_id: id,
                bot_id,
            });
        }

        Ok(model.into())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Conversation>, ConversationRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ConversationRepositoryError::DatabaseError(e.to_string()))?;

        let result = conversations::table
            .find(id)
            .first::<ConversationModel>(&mut conn)
            .optional()
            .map_err(|e| ConversationRepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.map(Conversation::from))
    }

    async fn save_turn(&self, turn: &Turn) -> Result<(), ConversationRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ConversationRepositoryError::DatabaseError(e.to_string()))?;

        let new_turn = NewTurnModel::from(turn);

        diesel::insert_into(turns::table)
            .values(&new_turn)
            .execute(&mut conn)
            .map_err(|e| ConversationRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn history(
        &self,
        conversation_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Turn>, ConversationRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ConversationRepositoryError::DatabaseError(e.to_string()))?;

        let models = turns::table
            .filter(turns::conversation_id.eq(conversation_id))
            .order(turns::created_at.desc())
            .limit(limit)
            .load::<TurnModel>(&mut conn)
            .map_err(|e| ConversationRepositoryError::DatabaseError(e.to_string()))?;

        // Loaded newest-first; callers get chronological order.
        Ok(models.into_iter().rev().map(Turn::from).collect())
    }
}
