pub mod bot_model;
pub mod chunk_model;
pub mod conversation_model;
pub mod document_model;

pub use bot_model::{BotModel, NewBotModel};
pub use chunk_model::{DocumentChunkModel, NewDocumentChunkModel};
pub use conversation_model::{ConversationModel, NewConversationModel, NewTurnModel, TurnModel};
pub use document_model::{DocumentModel, NewDocumentModel};
