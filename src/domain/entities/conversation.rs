use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A chat session owned by one bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    id: Uuid,
    bot_id: Uuid,
    created_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new(id: Uuid, bot_id: Uuid) -> Self {
        Self {
            id,
            bot_id,
            created_at: Utc::now(),
        }
    }

    pub fn from_stored(id: Uuid, bot_id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            bot_id,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn bot_id(&self) -> Uuid {
        self.bot_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// One user message with its generated response and the chunk ids that were
/// included as context. Persisted as a single unit or not at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    id: Uuid,
    conversation_id: Uuid,
    message: String,
    response: String,
    context_chunk_ids: Vec<Uuid>,
    created_at: DateTime<Utc>,
}

impl Turn {
    pub fn new(
        conversation_id: Uuid,
        message: String,
        response: String,
        context_chunk_ids: Vec<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            conversation_id,
            message,
            response,
            context_chunk_ids,
            created_at: Utc::now(),
        }
    }

    pub fn from_stored(
        id: Uuid,
        conversation_id: Uuid,
        message: String,
        response: String,
        context_chunk_ids: Vec<Uuid>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            conversation_id,
            message,
            response,
            context_chunk_ids,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn conversation_id(&self) -> Uuid {
        self.conversation_id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn context_chunk_ids(&self) -> &[Uuid] {
        &self.context_chunk_ids
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn used_context(&self) -> bool {
        !self.context_chunk_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_with_context() {
        let turn = Turn::new(
            Uuid::new_v4(),
            "What is the leave policy?".to_string(),
            "You get 25 days.".to_string(),
            vec![Uuid::new_v4(), Uuid::new_v4()],
        );

        assert!(turn.used_context());
        assert_eq!(turn.context_chunk_ids().len(), 2);
    }

    #[test]
    fn test_turn_without_context() {
        let turn = Turn::new(
            Uuid::new_v4(),
            "Hello".to_string(),
            "Hi there!".to_string(),
            Vec::new(),
        );

        assert!(!turn.used_context());
    }
}
