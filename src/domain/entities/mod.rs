pub mod bot;
pub mod conversation;
pub mod document;
pub mod document_chunk;

pub use bot::{Bot, BotSettings};
pub use conversation::{Conversation, Turn};
pub use document::Document;
pub use document_chunk::DocumentChunk;
