pub mod chat;
pub mod ingestion;
pub mod prompt;
pub mod retrieval;
pub mod segmenter;

pub use chat::ChatOrchestrator;
pub use ingestion::DocumentIngestService;
pub use retrieval::RetrievalEngine;
pub use segmenter::Segmenter;
