pub mod postgres_bot_repository;
pub mod postgres_chunk_repository;
pub mod postgres_conversation_repository;
pub mod postgres_document_repository;

pub use postgres_bot_repository::PostgresBotRepository;
pub use postgres_chunk_repository::PostgresChunkRepository;
pub use postgres_conversation_repository::PostgresConversationRepository;
pub use postgres_document_repository::PostgresDocumentRepository;
