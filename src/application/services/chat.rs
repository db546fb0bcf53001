use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::ports::ChatModel;
use crate::application::services::RetrievalEngine;
use crate::application::services::prompt;
use crate::application::services::retrieval::RetrievalError;
use crate::domain::entities::Turn;
use crate::domain::repositories::conversation_repository::ConversationRepositoryError;
use crate::domain::repositories::{BotRepository, ConversationRepository};

#[derive(Debug)]
pub enum ChatError {
    Validation(String),
    NotFound(String),
    Upstream(String),
    Persistence(String),
}

impl std::fmt::Display for ChatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatError::Validation(msg) => write!(f, "Validation error: {}", msg),
            ChatError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ChatError::Upstream(msg) => write!(f, "Upstream service error: {}", msg),
            ChatError::Persistence(msg) => write!(f, "Persistence error: {}", msg),
        }
    }
}

impl std::error::Error for ChatError {}

impl From<RetrievalError> for ChatError {
    fn from(error: RetrievalError) -> Self {
        match error {
            RetrievalError::ValidationError(msg) => ChatError::Validation(msg),
            RetrievalError::EmbeddingError(msg) => ChatError::Upstream(msg),
            RetrievalError::RepositoryError(msg) => ChatError::Persistence(msg),
        }
    }
}

/// Deployment-wide fallbacks, used when a bot carries no override.
#[derive(Debug, Clone, Copy)]
pub struct RetrievalDefaults {
    pub top_k: i32,
    pub similarity_threshold: f32,
}

#[derive(Debug, Clone)]
pub struct ChatTurnOutcome {
    pub response: String,
    pub session_id: Uuid,
    pub context_used: bool,
    pub sources: Vec<String>,
    pub turn_id: Uuid,
}

/// End-to-end turn handler:
/// receive -> validate bot -> resolve session -> retrieve -> assemble ->
/// generate -> persist -> respond. Terminal on the first failing step.
pub struct ChatOrchestrator {
    bot_repository: Arc<dyn BotRepository>,
    conversation_repository: Arc<dyn ConversationRepository>,
    retrieval_engine: Arc<RetrievalEngine>,
    chat_model: Arc<dyn ChatModel>,
    defaults: RetrievalDefaults,
}

impl ChatOrchestrator {
    pub fn new(
        bot_repository: Arc<dyn BotRepository>,
        conversation_repository: Arc<dyn ConversationRepository>,
        retrieval_engine: Arc<RetrievalEngine>,
        chat_model: Arc<dyn ChatModel>,
        defaults: RetrievalDefaults,
    ) -> Self {
        Self {
            bot_repository,
            conversation_repository,
            retrieval_engine,
            chat_model,
            defaults,
        }
    }

    pub async fn handle_turn(
        &self,
        message: &str,
        bot_id: Uuid,
        session_id: Option<Uuid>,
    ) -> Result<ChatTurnOutcome, ChatError> {
        if message.trim().is_empty() {
            return Err(ChatError::Validation("Message cannot be empty".to_string()));
        }

        // The bot is validated before any session exists, so a rejected turn
        // leaves no side effects behind.
        let bot = self
            .bot_repository
            .find_by_id(bot_id)
            .await
            .map_err(|e| ChatError::Persistence(e.to_string()))?
            .ok_or_else(|| ChatError::NotFound(format!("Bot {} does not exist", bot_id)))?;

        if !bot.is_active() {
            return Err(ChatError::Validation(format!(
                "Bot {} is not active",
                bot_id
            )));
        }

        let session_id = session_id.unwrap_or_else(Uuid::new_v4);
        let conversation = self
            .conversation_repository
            .get_or_create(session_id, bot.id())
            .await
            .map_err(|e| match e {
                ConversationRepositoryError::WrongBot { .. } => {
                    ChatError::Validation(e.to_string())
                }
                ConversationRepositoryError::DatabaseError(_) => {
                    ChatError::Persistence(e.to_string())
                }
            })?;

        let top_k = bot.settings().top_k().unwrap_or(self.defaults.top_k);
        let threshold = bot
            .settings()
            .similarity_threshold()
            .unwrap_or(self.defaults.similarity_threshold);

        let retrieval = self
            .retrieval_engine
            .retrieve(message, bot.id(), top_k as usize)
            .await?;

        let included = retrieval.above_threshold(threshold);
        let system_prompt = prompt::assemble(bot.system_prompt(), &included);

        let response = self
            .chat_model
            .generate(&system_prompt, message)
            .await
            .map_err(|e| {
                warn!(bot_id = %bot.id(), session_id = %session_id, error = %e, "generation failed");
                ChatError::Upstream(e.to_string())
            })?;

        let context_chunk_ids: Vec<Uuid> = included.iter().map(|chunk| chunk.chunk_id).collect();
        let sources: Vec<String> = included
            .iter()
            .map(|chunk| chunk.document_filename.clone())
            .collect();

        let turn = Turn::new(
            conversation.id(),
            message.to_string(),
            response.clone(),
            context_chunk_ids,
        );

        self.conversation_repository
            .save_turn(&turn)
            .await
            .map_err(|e| ChatError::Persistence(e.to_string()))?;

        info!(
            bot_id = %bot.id(),
            session_id = %session_id,
            turn_id = %turn.id(),
            context_chunks = turn.context_chunk_ids().len(),
            "handled chat turn"
        );

        Ok(ChatTurnOutcome {
            response,
            session_id,
            context_used: turn.used_context(),
            sources,
            turn_id: turn.id(),
        })
    }

    /// Most recent `limit` turns of a session, oldest first.
    pub async fn history(&self, session_id: Uuid, limit: i64) -> Result<Vec<Turn>, ChatError> {
        self.conversation_repository
            .history(session_id, limit)
            .await
            .map_err(|e| ChatError::Persistence(e.to_string()))
    }
}
