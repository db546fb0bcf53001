use async_trait::async_trait;
use pgvector::Vector;
use reqwest::{Client, Error as ReqwestError, StatusCode};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::application::ports::chat_model::{ChatModel, ChatModelError};
use crate::application::ports::embedding_provider::{EmbeddingProvider, EmbeddingProviderError};

#[derive(Serialize)]
pub struct EmbeddingsApiRequest {
    pub model: String,
    pub input: EmbeddingInput,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbeddingInput {
    Single(String),
    Multiple(Vec<String>),
}

#[derive(Deserialize)]
pub struct EmbeddingsApiResponse {
    pub data: Vec<EmbeddingDatum>,
}

#[derive(Deserialize)]
pub struct EmbeddingDatum {
    pub index: usize,
    pub embedding: Vec<f32>,
}

#[derive(Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_url: String,
    pub api_key: String,
    pub embedding_model: String,
    pub embedding_dimension: usize,
    pub chat_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl OpenAiConfig {
    pub fn from_env() -> Self {
        let api_url =
            env::var("OPENAI_API_URL").unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let api_key = env::var("OPENAI_API_KEY").unwrap_or_default();

        Self {
            api_url,
            api_key,
            embedding_model: "text-embedding-ada-002".to_string(),
            embedding_dimension: 1536,
            chat_model: "gpt-4o".to_string(),
            temperature: 0.7,
            max_tokens: 1500,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug)]
pub enum OpenAiError {
    RequestError(String),
    ParseError(String),
    StatusError(StatusCode, String),
}

impl OpenAiError {
    fn is_unavailable(&self) -> bool {
        matches!(
            self,
            OpenAiError::StatusError(StatusCode::SERVICE_UNAVAILABLE, _)
                | OpenAiError::StatusError(StatusCode::TOO_MANY_REQUESTS, _)
        )
    }
}

/// Single-attempt client against the OpenAI HTTP API. A failed request is
/// surfaced to the caller as-is; turn handling decides what a failure means,
/// not the transport layer.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, ReqwestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self, ReqwestError> {
        Self::new(OpenAiConfig::from_env())
    }

    async fn request_embeddings(
        &self,
        input: EmbeddingInput,
    ) -> Result<EmbeddingsApiResponse, OpenAiError> {
        let request = EmbeddingsApiRequest {
            model: self.config.embedding_model.clone(),
            input,
        };

        let url = format!("{}/embeddings", self.config.api_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| OpenAiError::RequestError(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OpenAiError::StatusError(status, body));
        }

        response
            .json::<EmbeddingsApiResponse>()
            .await
            .map_err(|e| OpenAiError::ParseError(e.to_string()))
    }

    async fn request_completion(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<ChatCompletionResponse, OpenAiError> {
        let request = ChatCompletionRequest {
            model: self.config.chat_model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_message.to_string(),
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let url = format!("{}/chat/completions", self.config.api_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| OpenAiError::RequestError(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OpenAiError::StatusError(status, body));
        }

        response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| OpenAiError::ParseError(e.to_string()))
    }
}

fn embedding_error(e: OpenAiError) -> EmbeddingProviderError {
    if e.is_unavailable() {
        return EmbeddingProviderError::ServiceUnavailable;
    }

    match e {
        OpenAiError::RequestError(msg) => EmbeddingProviderError::NetworkError(msg),
        OpenAiError::ParseError(msg) => EmbeddingProviderError::ApiError(msg),
        OpenAiError::StatusError(status, body) => {
            EmbeddingProviderError::ApiError(format!("{}: {}", status, body))
        }
    }
}

fn chat_error(e: OpenAiError) -> ChatModelError {
    if e.is_unavailable() {
        return ChatModelError::ServiceUnavailable;
    }

    match e {
        OpenAiError::RequestError(msg) => ChatModelError::NetworkError(msg),
        OpenAiError::ParseError(msg) => ChatModelError::ApiError(msg),
        OpenAiError::StatusError(status, body) => {
            ChatModelError::ApiError(format!("{}: {}", status, body))
        }
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiClient {
    async fn embed(&self, text: &str) -> Result<Vector, EmbeddingProviderError> {
        let response = self
            .request_embeddings(EmbeddingInput::Single(text.to_string()))
            .await
            .map_err(embedding_error)?;

        let datum = response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| EmbeddingProviderError::ApiError("No embeddings returned".to_string()))?;

        Ok(Vector::from(datum.embedding))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vector>, EmbeddingProviderError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .request_embeddings(EmbeddingInput::Multiple(texts.to_vec()))
            .await
            .map_err(embedding_error)?;

        if response.data.len() != texts.len() {
            return Err(EmbeddingProviderError::ApiError(format!(
                "Expected {} embeddings, got {}",
                texts.len(),
                response.data.len()
            )));
        }

        // The API may return data out of order; index is authoritative.
        let mut data = response.data;
        data.sort_by_key(|d| d.index);

        Ok(data
            .into_iter()
            .map(|d| Vector::from(d.embedding))
            .collect())
    }

    fn embedding_dimension(&self) -> usize {
        self.config.embedding_dimension
    }
}

#[async_trait]
impl ChatModel for OpenAiClient {
    async fn generate(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, ChatModelError> {
        let response = self
            .request_completion(system_prompt, user_message)
            .await
            .map_err(chat_error)?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ChatModelError::ApiError("No completion returned".to_string()))?;

        Ok(choice.message.content)
    }
}
