use async_trait::async_trait;

#[derive(Debug)]
pub enum ChatModelError {
    NetworkError(String),
    ApiError(String),
    ServiceUnavailable,
}

impl std::fmt::Display for ChatModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatModelError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            ChatModelError::ApiError(msg) => write!(f, "API error: {}", msg),
            ChatModelError::ServiceUnavailable => write!(f, "Service unavailable"),
        }
    }
}

impl std::error::Error for ChatModelError {}

/// External text-generation capability. Receives the fully assembled system
/// prompt plus the raw user message. Failures are terminal; no retry.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn generate(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, ChatModelError>;
}
