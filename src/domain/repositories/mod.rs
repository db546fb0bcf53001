pub mod bot_repository;
pub mod chunk_repository;
pub mod conversation_repository;
pub mod document_repository;

pub use bot_repository::BotRepository;
pub use chunk_repository::ChunkRepository;
pub use conversation_repository::ConversationRepository;
pub use document_repository::DocumentRepository;
