use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::{Conversation, Turn};
use crate::infrastructure::database::schema::{conversations, turns};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = conversations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ConversationModel {
    pub id: Uuid,
    pub bot_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = conversations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewConversationModel {
    pub id: Uuid,
    pub bot_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<&Conversation> for NewConversationModel {
    fn from(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id(),
            bot_id: conversation.bot_id(),
            created_at: conversation.created_at(),
        }
    }
}

impl From<ConversationModel> for Conversation {
    fn from(model: ConversationModel) -> Self {
        Conversation::from_stored(model.id, model.bot_id, model.created_at)
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(belongs_to(ConversationModel, foreign_key = conversation_id))]
#[diesel(table_name = turns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TurnModel {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub message: String,
    pub response: String,
    pub context_chunk_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = turns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewTurnModel {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub message: String,
    pub response: String,
    pub context_chunk_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<&Turn> for NewTurnModel {
    fn from(turn: &Turn) -> Self {
        Self {
            id: turn.id(),
            conversation_id: turn.conversation_id(),
            message: turn.message().to_string(),
            response: turn.response().to_string(),
            context_chunk_ids: turn.context_chunk_ids().to_vec(),
            created_at: turn.created_at(),
        }
    }
}

impl From<TurnModel> for Turn {
    fn from(model: TurnModel) -> Self {
        Turn::from_stored(
            model.id,
            model.conversation_id,
            model.message,
            model.response,
            model.context_chunk_ids,
            model.created_at,
        )
    }
}
