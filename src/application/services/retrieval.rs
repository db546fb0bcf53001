use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::EmbeddingProvider;
use crate::domain::repositories::ChunkRepository;
use crate::domain::repositories::chunk_repository::ScoredChunk;

#[derive(Debug)]
pub enum RetrievalError {
    ValidationError(String),
    EmbeddingError(String),
    RepositoryError(String),
}

impl std::fmt::Display for RetrievalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RetrievalError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            RetrievalError::EmbeddingError(msg) => write!(f, "Embedding error: {}", msg),
            RetrievalError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for RetrievalError {}

/// The full ranked result of one retrieval. All hits are kept, including
/// sub-threshold ones, so callers can observe what the search saw; only
/// `above_threshold` entries are eligible for prompt inclusion.
#[derive(Debug, Clone)]
pub struct Retrieval {
    hits: Vec<ScoredChunk>,
}

impl Retrieval {
    pub fn new(hits: Vec<ScoredChunk>) -> Self {
        Self { hits }
    }

    pub fn hits(&self) -> &[ScoredChunk] {
        &self.hits
    }

    /// Strictly-greater comparison: a hit scoring exactly at the threshold
    /// is excluded.
    pub fn above_threshold(&self, threshold: f32) -> Vec<&ScoredChunk> {
        self.hits
            .iter()
            .filter(|hit| hit.similarity_score > threshold)
            .collect()
    }
}

pub struct RetrievalEngine {
    embedding_provider: Arc<dyn EmbeddingProvider>,
    chunk_repository: Arc<dyn ChunkRepository>,
}

impl RetrievalEngine {
    pub fn new(
        embedding_provider: Arc<dyn EmbeddingProvider>,
        chunk_repository: Arc<dyn ChunkRepository>,
    ) -> Self {
        Self {
            embedding_provider,
            chunk_repository,
        }
    }

    pub async fn retrieve(
        &self,
        query: &str,
        bot_id: Uuid,
        top_k: usize,
    ) -> Result<Retrieval, RetrievalError> {
        if query.trim().is_empty() {
            return Err(RetrievalError::ValidationError(
                "Query cannot be empty".to_string(),
            ));
        }

        let query_vector = self
            .embedding_provider
            .embed(query)
            .await
            .map_err(|e| RetrievalError::EmbeddingError(e.to_string()))?;

        let hits = self
            .chunk_repository
            .search(&query_vector, bot_id, top_k)
            .await
            .map_err(|e| RetrievalError::RepositoryError(e.to_string()))?;

        Ok(Retrieval::new(hits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pgvector::Vector;
    use std::collections::HashMap;

    use crate::application::ports::embedding_provider::EmbeddingProviderError;
    use crate::domain::repositories::chunk_repository::ChunkRepositoryError;

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

    struct FailingEmbeddingProvider;

    #[async_trait]
    impl EmbeddingProvider for FailingEmbeddingProvider {
        async fn embed(&self, _text: &str) -> Result<Vector, EmbeddingProviderError> {
            Err(EmbeddingProviderError::ServiceUnavailable)
        }

        async fn embed_batch(
            &self,
            _texts: &[String],
        ) -> Result<Vec<Vector>, EmbeddingProviderError> {
            Err(EmbeddingProviderError::ServiceUnavailable)
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

    fn scored(score: f32) -> ScoredChunk {
        ScoredChunk {
            chunk_id: Uuid::new_v4(),
            document_id: Uuid::new_v4(),
            document_filename: "doc.txt".to_string(),
            chunk_index: 0,
            chunk_text: "text".to_string(),
            similarity_score: score,
        }
    }

    #[tokio::test]
    async fn test_retrieve_returns_full_ranked_list() {
        let engine = RetrievalEngine::new(
            Arc::new(FixedEmbeddingProvider),
            Arc::new(CannedChunkRepository {
                hits: vec![scored(0.9), scored(0.5)],
            }),
        );

        let retrieval = engine.retrieve("query", Uuid::new_v4(), 5).await.unwrap();

        assert_eq!(retrieval.hits().len(), 2);
    }

    #[tokio::test]
    async fn test_threshold_is_exclusive() {
        let retrieval = Retrieval::new(vec![scored(0.9), scored(0.7), scored(0.5)]);

        let included = retrieval.above_threshold(0.7);

        // 0.7 == threshold is excluded; only strictly greater scores pass.
        assert_eq!(included.len(), 1);
        assert!((included[0].similarity_score - 0.9).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_all_hits_above_threshold_included() {
        let retrieval = Retrieval::new(vec![scored(0.95), scored(0.8)]);

        assert_eq!(retrieval.above_threshold(0.7).len(), 2);
    }

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let engine = RetrievalEngine::new(
            Arc::new(FixedEmbeddingProvider),
            Arc::new(CannedChunkRepository { hits: Vec::new() }),
        );

        let result = engine.retrieve("   ", Uuid::new_v4(), 5).await;

        assert!(matches!(result, Err(RetrievalError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_embedding_failure_is_terminal() {
        let engine = RetrievalEngine::new(
            Arc::new(FailingEmbeddingProvider),
            Arc::new(CannedChunkRepository {
                hits: vec![scored(0.9)],
            }),
        );

        let result = engine.retrieve("query", Uuid::new_v4(), 5).await;

        assert!(matches!(result, Err(RetrievalError::EmbeddingError(_))));
    }

    /// Scope-aware double: only chunks of documents associated with the
    /// requesting bot are candidates, mirroring the store's join.
    struct ScopedChunkRepository {
        chunks_by_bot: HashMap<Uuid, Vec<ScoredChunk>>,
    }

    #[async_trait]
    impl ChunkRepository for ScopedChunkRepository {
        async fn search(
            &self,
            _query_vector: &Vector,
            bot_id: Uuid,
            top_k: usize,
        ) -> Result<Vec<ScoredChunk>, ChunkRepositoryError> {
            let mut hits = self
                .chunks_by_bot
                .get(&bot_id)
                .cloned()
                .unwrap_or_default();
            hits.truncate(top_k);
            Ok(hits)
        }

        async fn count_by_document(&self, _document_id: Uuid) -> Result<i64, ChunkRepositoryError> {
            Ok(0)
        }
    }

    fn scored_from(score: f32, filename: &str) -> ScoredChunk {
        ScoredChunk {
            chunk_id: Uuid::new_v4(),
            document_id: Uuid::new_v4(),
            document_filename: filename.to_string(),
            chunk_index: 0,
            chunk_text: "text".to_string(),
            similarity_score: score,
        }
    }

    #[tokio::test]
    async fn test_search_never_crosses_bot_scope() {
        let bot_a = Uuid::new_v4();
        let bot_b = Uuid::new_v4();

        let mut chunks_by_bot = HashMap::new();
        chunks_by_bot.insert(bot_a, vec![scored_from(0.9, "a-handbook.pdf")]);
        chunks_by_bot.insert(
            bot_b,
            vec![
                scored_from(0.99, "b-policy.txt"),
                scored_from(0.95, "b-notes.md"),
            ],
        );

        let engine = RetrievalEngine::new(
            Arc::new(FixedEmbeddingProvider),
            Arc::new(ScopedChunkRepository { chunks_by_bot }),
        );

        // Bot B's higher-scoring chunks must never surface for bot A.
        let for_a = engine.retrieve("query", bot_a, 5).await.unwrap();
        assert_eq!(for_a.hits().len(), 1);
        assert_eq!(for_a.hits()[0].document_filename, "a-handbook.pdf");

        let for_b = engine.retrieve("query", bot_b, 5).await.unwrap();
        assert_eq!(for_b.hits().len(), 2);
        assert!(
            for_b
                .hits()
                .iter()
                .all(|hit| hit.document_filename.starts_with("b-"))
        );

        // A bot with no associated documents sees an empty corpus.
        let for_unknown = engine.retrieve("query", Uuid::new_v4(), 5).await.unwrap();
        assert!(for_unknown.hits().is_empty());
    }

    #[tokio::test]
    async fn test_top_k_limits_results() {
        let engine = RetrievalEngine::new(
            Arc::new(FixedEmbeddingProvider),
            Arc::new(CannedChunkRepository {
                hits: vec![scored(0.9), scored(0.8), scored(0.7)],
            }),
        );

        let retrieval = engine.retrieve("query", Uuid::new_v4(), 2).await.unwrap();

        assert_eq!(retrieval.hits().len(), 2);
    }
}
