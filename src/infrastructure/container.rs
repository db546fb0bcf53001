use std::sync::Arc;

use crate::{
    application::{
        ports::{ChatModel, EmbeddingProvider},
        services::{
            ChatOrchestrator, DocumentIngestService, RetrievalEngine, Segmenter,
            chat::RetrievalDefaults,
        },
        use_cases::{ChatTurnUseCase, IngestDocumentUseCase, SearchChunksUseCase},
    },
    config::RagConfig,
    domain::repositories::{
        BotRepository, ChunkRepository, ConversationRepository, DocumentRepository,
    },
    infrastructure::{
        database::{
            DatabaseConfig, create_connection_pool, get_connection_from_pool,
            repositories::{
                PostgresBotRepository, PostgresChunkRepository, PostgresConversationRepository,
                PostgresDocumentRepository,
            },
            run_migrations,
        },
        external_services::OpenAiClient,
    },
};

pub struct AppContainer {
    // Repositories
    pub document_repository: Arc<dyn DocumentRepository>,
    pub chunk_repository: Arc<dyn ChunkRepository>,
    pub bot_repository: Arc<dyn BotRepository>,
    pub conversation_repository: Arc<dyn ConversationRepository>,

    // External services
    pub embedding_provider: Arc<dyn EmbeddingProvider>,
    pub chat_model: Arc<dyn ChatModel>,

    // Application services
    pub ingest_service: Arc<DocumentIngestService>,
    pub retrieval_engine: Arc<RetrievalEngine>,
    pub chat_orchestrator: Arc<ChatOrchestrator>,

    // Use cases
    pub ingest_document_use_case: Arc<IngestDocumentUseCase>,
    pub search_chunks_use_case: Arc<SearchChunksUseCase>,
    pub chat_turn_use_case: Arc<ChatTurnUseCase>,
}

impl AppContainer {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        dotenv::dotenv().ok();

        let config = RagConfig::from_env()?;

        // Database connection pool and migrations
        let db_config = DatabaseConfig::from_env()?;
        let db_pool = create_connection_pool(&db_config)?;
        {
            let mut conn = get_connection_from_pool(&db_pool)
                .map_err(|e| format!("Failed to get database connection: {}", e))?;
            run_migrations(&mut conn)
                .map_err(|e| format!("Failed to run database migrations: {}", e))?;
        }

        // Repositories
        let document_repository: Arc<dyn DocumentRepository> =
            Arc::new(PostgresDocumentRepository::new(db_pool.clone()));
        let chunk_repository: Arc<dyn ChunkRepository> =
            Arc::new(PostgresChunkRepository::new(db_pool.clone()));
        let bot_repository: Arc<dyn BotRepository> =
            Arc::new(PostgresBotRepository::new(db_pool.clone()));
        let conversation_repository: Arc<dyn ConversationRepository> =
            Arc::new(PostgresConversationRepository::new(db_pool));

        // One client backs both model-facing ports
        let openai_client = Arc::new(OpenAiClient::from_env()?);
        let embedding_provider: Arc<dyn EmbeddingProvider> = openai_client.clone();
        let chat_model: Arc<dyn ChatModel> = openai_client;

        // Application services
        let segmenter = Segmenter::new(config.chunk_size, config.chunk_overlap)
            .map_err(|e| format!("Invalid segmenter configuration: {}", e))?;

        let ingest_service = Arc::new(DocumentIngestService::new(
            segmenter,
            embedding_provider.clone(),
            document_repository.clone(),
            config.embedding_dimension,
        ));

        let retrieval_engine = Arc::new(RetrievalEngine::new(
            embedding_provider.clone(),
            chunk_repository.clone(),
        ));

        let chat_orchestrator = Arc::new(ChatOrchestrator::new(
            bot_repository.clone(),
            conversation_repository.clone(),
            retrieval_engine.clone(),
            chat_model.clone(),
            RetrievalDefaults {
                top_k: config.top_k,
                similarity_threshold: config.similarity_threshold,
            },
        ));

        // Use cases
        let ingest_document_use_case =
            Arc::new(IngestDocumentUseCase::new(ingest_service.clone()));
        let search_chunks_use_case = Arc::new(SearchChunksUseCase::new(
            retrieval_engine.clone(),
            config.top_k,
        ));
        let chat_turn_use_case = Arc::new(ChatTurnUseCase::new(chat_orchestrator.clone()));

        Ok(Self {
            document_repository,
            chunk_repository,
            bot_repository,
            conversation_repository,
            embedding_provider,
            chat_model,
            ingest_service,
            retrieval_engine,
            chat_orchestrator,
            ingest_document_use_case,
            search_chunks_use_case,
            chat_turn_use_case,
        })
    }
}
