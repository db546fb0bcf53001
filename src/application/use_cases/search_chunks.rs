use std::sync::Arc;
use uuid::Uuid;

use crate::application::services::RetrievalEngine;
use crate::application::services::retrieval::RetrievalError;

const PREVIEW_LENGTH: usize = 200;

#[derive(Debug, Clone)]
pub struct SearchChunksRequest {
    pub query: String,
    pub bot_id: Uuid,
    pub limit: Option<i32>,
}

/// Display-facing hit: the score is rounded to four decimals here, while
/// ordering upstream used full precision.
#[derive(Debug, Clone)]
pub struct SearchResultItem {
    pub chunk_id: Uuid,
    pub document_filename: String,
    pub chunk_text: String,
    pub chunk_index: i32,
    pub similarity_score: f32,
}

#[derive(Debug, Clone)]
pub struct SearchChunksResponse {
    pub query: String,
    pub results: Vec<SearchResultItem>,
    pub total_results: i32,
}

pub struct SearchChunksUseCase {
    retrieval_engine: Arc<RetrievalEngine>,
    default_limit: i32,
}

impl SearchChunksUseCase {
    pub fn new(retrieval_engine: Arc<RetrievalEngine>, default_limit: i32) -> Self {
        Self {
            retrieval_engine,
            default_limit,
        }
    }

    pub async fn execute(
        &self,
        request: SearchChunksRequest,
    ) -> Result<SearchChunksResponse, RetrievalError> {
        if request.query.trim().is_empty() {
            return Err(RetrievalError::ValidationError(
                "Query cannot be empty".to_string(),
            ));
        }

        let limit = request.limit.unwrap_or(self.default_limit);
        if limit <= 0 || limit > 100 {
            return Err(RetrievalError::ValidationError(
                "Limit must be between 1 and 100".to_string(),
            ));
        }

        let retrieval = self
            .retrieval_engine
            .retrieve(&request.query, request.bot_id, limit as usize)
            .await?;

        let results: Vec<SearchResultItem> = retrieval
            .hits()
            .iter()
            .map(|hit| SearchResultItem {
                chunk_id: hit.chunk_id,
                document_filename: hit.document_filename.clone(),
                chunk_text: preview(&hit.chunk_text),
                chunk_index: hit.chunk_index,
                similarity_score: round_score(hit.similarity_score),
            })
            .collect();

        Ok(SearchChunksResponse {
            query: request.query,
            total_results: results.len() as i32,
            results,
        })
    }
}

fn round_score(score: f32) -> f32 {
    (score * 10_000.0).round() / 10_000.0
}

fn preview(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= PREVIEW_LENGTH {
        return text.to_string();
    }

    let truncated: String = chars[..PREVIEW_LENGTH].iter().collect();
    format!("{}...", truncated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pgvector::Vector;

    use crate::application::ports::embedding_provider::{
        EmbeddingProvider, EmbeddingProviderError,
    };
    use crate::domain::repositories::ChunkRepository;
    use crate::domain::repositories::chunk_repository::{ChunkRepositoryError, ScoredChunk};

    struct FixedEmbeddingProvider;

    #[async_trait]
    impl EmbeddingProvider for FixedEmbeddingProvider {
        async fn embed(&self, _text: &str) -> Result<Vector, EmbeddingProviderError> {
            Ok(Vector::from(vec![1.0, 0.0]))
        }

        async fn embed_batch(
            &self,
            texts: &[String],
        ) -> Result<Vec<Vector>, EmbeddingProviderError> {
            Ok(texts.iter().map(|_| Vector::from(vec![1.0, 0.0])).collect())
        }

        fn embedding_dimension(&self) -> usize {
            2
        }
    }

    struct CannedChunkRepository {
        hits: Vec<ScoredChunk>,
    }

    #[async_trait]
    impl ChunkRepository for CannedChunkRepository {
        async fn search(
            &self,
            _query_vector: &Vector,
            _bot_id: Uuid,
            top_k: usize,
        ) -> Result<Vec<ScoredChunk>, ChunkRepositoryError> {
            let mut hits = self.hits.clone();
            hits.truncate(top_k);
            Ok(hits)
        }

        async fn count_by_document(&self, _document_id: Uuid) -> Result<i64, ChunkRepositoryError> {
            Ok(self.hits.len() as i64)
        }
    }

    fn use_case(hits: Vec<ScoredChunk>) -> SearchChunksUseCase {
        SearchChunksUseCase::new(
            Arc::new(RetrievalEngine::new(
                Arc::new(FixedEmbeddingProvider),
                Arc::new(CannedChunkRepository { hits }),
            )),
            5,
        )
    }

    fn scored(score: f32, text: &str) -> ScoredChunk {
        ScoredChunk {
            chunk_id: Uuid::new_v4(),
            document_id: Uuid::new_v4(),
            document_filename: "doc.txt".to_string(),
            chunk_index: 0,
            chunk_text: text.to_string(),
            similarity_score: score,
        }
    }

    #[tokio::test]
    async fn test_scores_rounded_to_four_decimals() {
        let use_case = use_case(vec![scored(0.876543, "text")]);

        let response = use_case
            .execute(SearchChunksRequest {
                query: "query".to_string(),
                bot_id: Uuid::new_v4(),
                limit: None,
            })
            .await
            .unwrap();

        assert_eq!(response.results[0].similarity_score, 0.8765);
    }

    #[tokio::test]
    async fn test_long_chunk_text_truncated() {
        let long_text = "x".repeat(500);
        let use_case = use_case(vec![scored(0.9, &long_text)]);

        let response = use_case
            .execute(SearchChunksRequest {
                query: "query".to_string(),
                bot_id: Uuid::new_v4(),
                limit: None,
            })
            .await
            .unwrap();

        assert_eq!(response.results[0].chunk_text.len(), 203);
        assert!(response.results[0].chunk_text.ends_with("..."));
    }

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let use_case = use_case(Vec::new());

        let result = use_case
            .execute(SearchChunksRequest {
                query: "  ".to_string(),
                bot_id: Uuid::new_v4(),
                limit: None,
            })
            .await;

        assert!(matches!(result, Err(RetrievalError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_limit_bounds_enforced() {
        let use_case = use_case(Vec::new());

        for limit in [0, -1, 101] {
            let result = use_case
                .execute(SearchChunksRequest {
                    query: "query".to_string(),
                    bot_id: Uuid::new_v4(),
                    limit: Some(limit),
                })
                .await;
            assert!(matches!(result, Err(RetrievalError::ValidationError(_))));
        }
    }
}
