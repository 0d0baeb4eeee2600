use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::core::config::AppConfig;
use crate::llm::OpenAiProvider;
use crate::rag::{EmbeddingRetriever, QaEngine, QaSettings, QdrantStore};

pub struct AppState {
    pub config: AppConfig,
    pub engine: Arc<QaEngine>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Wire the collaborators once at startup; invocations share them
    /// read-only through `Arc`.
    pub fn initialize() -> anyhow::Result<Arc<Self>> {
        let config = AppConfig::from_env()?;

        let provider = Arc::new(OpenAiProvider::new(
            config.openai_base_url.clone(),
            config.openai_api_key.clone(),
        ));
        let store = Arc::new(QdrantStore::new(
            config.qdrant_url.clone(),
            config.qdrant_api_key.clone(),
            config.collection.clone(),
        ));
        let retriever = Arc::new(EmbeddingRetriever::new(
            provider.clone(),
            store,
            config.embedding_model.clone(),
        ));
        let engine = Arc::new(QaEngine::new(
            retriever,
            provider,
            config.chat_model.clone(),
            QaSettings {
                top_k: config.top_k,
                score_threshold: config.score_threshold,
            },
        ));

        Ok(Arc::new(AppState {
            config,
            engine,
            started_at: Utc::now(),
        }))
    }

    #[cfg(test)]
    pub fn for_tests(config: AppConfig, engine: Arc<QaEngine>) -> Arc<Self> {
        Arc::new(AppState {
            config,
            engine,
            started_at: Utc::now(),
        })
    }
}
