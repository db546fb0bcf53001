use std::sync::Arc;
use uuid::Uuid;

use crate::application::services::ChatOrchestrator;
use crate::application::services::chat::ChatError;

#[derive(Debug, Clone)]
pub struct ChatTurnRequest {
    pub message: String,
    pub bot_id: Uuid,
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct ChatTurnResponse {
    pub response: String,
    pub session_id: Uuid,
    pub context_used: bool,
    pub sources: Vec<String>,
    pub turn_id: Uuid,
}

pub struct ChatTurnUseCase {
    orchestrator: Arc<ChatOrchestrator>,
}

impl ChatTurnUseCase {
    pub fn new(orchestrator: Arc<ChatOrchestrator>) -> Self {
        Self { orchestrator }
    }

    pub async fn execute(&self, request: ChatTurnRequest) -> Result<ChatTurnResponse, ChatError> {
        let outcome = self
            .orchestrator
            .handle_turn(&request.message, request.bot_id, request.session_id)
            .await?;

        Ok(ChatTurnResponse {
            response: outcome.response,
            session_id: outcome.session_id,
            context_used: outcome.context_used,
            sources: outcome.sources,
            turn_id: outcome.turn_id,
        })
    }
}
