pub mod chat_turn;
pub mod ingest_document;
pub mod search_chunks;

pub use chat_turn::ChatTurnUseCase;
pub use ingest_document::IngestDocumentUseCase;
pub use search_chunks::SearchChunksUseCase;
