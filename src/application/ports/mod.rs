pub mod chat_model;
pub mod embedding_provider;

pub use chat_model::ChatModel;
pub use embedding_provider::EmbeddingProvider;
