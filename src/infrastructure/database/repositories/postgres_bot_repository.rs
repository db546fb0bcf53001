use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::Bot;
use crate::domain::repositories::bot_repository::{BotRepository, BotRepositoryError};
use crate::infrastructure::database::models::{BotModel, NewBotModel};
use crate::infrastructure::database::schema::{bot_documents, bots};
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresBotRepository {
    pool: DbPool,
}

impl PostgresBotRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BotRepository for PostgresBotRepository {
    async fn save(&self, bot: &Bot) -> Result<(), BotRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| BotRepositoryError::DatabaseError(e.to_string()))?;

        let new_bot = NewBotModel::from(bot);

        diesel::insert_into(bots::table)
            .values(&new_bot)
            .on_conflict(bots::id)
            .do_update()
            .set(&new_bot)
            .execute(&mut conn)
            .map_err(|e| BotRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Bot>, BotRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| BotRepositoryError::DatabaseError(e.to_string()))?;

        let result = bots::table
            .find(id)
            .first::<BotModel>(&mut conn)
            .optional()
            .map_err(|e| BotRepositoryError::DatabaseError(e.to_string()))?;

        match result {
            Some(model) => {
                let bot =
                    Bot::try_from(model).map_err(BotRepositoryError::DatabaseError)?;
                Ok(Some(bot))
            }
            None => Ok(None),
        }
    }

    async fn set_active(&self, id: Uuid, active: bool) -> Result<(), BotRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| BotRepositoryError::DatabaseError(e.to_string()))?;

        let updated = diesel::update(bots::table.find(id))
            .set((bots::is_active.eq(active), bots::updated_at.eq(Utc::now())))
            .execute(&mut conn)
            .map_err(|e| BotRepositoryError::DatabaseError(e.to_string()))?;

        if updated == 0 {
            return Err(BotRepositoryError::NotFound(id));
        }

        Ok(())
    }

    async fn add_document(
        &self,
        bot_id: Uuid,
        document_id: Uuid,
    ) -> Result<(), BotRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| BotRepositoryError::DatabaseError(e.to_string()))?;

        diesel::insert_into(bot_documents::table)
            .values((
                bot_documents::bot_id.eq(bot_id),
                bot_documents::document_id.eq(document_id),
            ))
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .map_err(|e| BotRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn remove_document(
        &self,
        bot_id: Uuid,
        document_id: Uuid,
    ) -> Result<bool, BotRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| BotRepositoryError::DatabaseError(e.to_string()))?;

        let deleted_count = diesel::delete(
            bot_documents::table
                .filter(bot_documents::bot_id.eq(bot_id))
                .filter(bot_documents::document_id.eq(document_id)),
        )
        .execute(&mut conn)
        .map_err(|e| BotRepositoryError::DatabaseError(e.to_string()))?;

        Ok(deleted_count > 0)
    }

    async fn document_ids(&self, bot_id: Uuid) -> Result<Vec<Uuid>, BotRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| BotRepositoryError::DatabaseError(e.to_string()))?;

        bot_documents::table
            .filter(bot_documents::bot_id.eq(bot_id))
            .select(bot_documents::document_id)
            .load::<Uuid>(&mut conn)
            .map_err(|e| BotRepositoryError::DatabaseError(e.to_string()))
    }
}
