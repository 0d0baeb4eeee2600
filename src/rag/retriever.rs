//! Passage retrieval: query embedding + vector-store search.

use std::sync::Arc;

use async_trait::async_trait;

use super::store::{ScoredPassage, VectorSearch};
use crate::core::errors::ApiError;
use crate::llm::LlmProvider;

/// The retrieval collaborator consumed by the QA engine:
/// `search(query, top_k)` returns passages ordered by descending relevance.
#[async_trait]
pub trait PassageRetriever: Send + Sync {
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<ScoredPassage>, ApiError>;
}

/// Embeds the query text, then searches the vector store with the vector.
pub struct EmbeddingRetriever {
    provider: Arc<dyn LlmProvider>,
    store: Arc<dyn VectorSearch>,
    embedding_model: String,
}

impl EmbeddingRetriever {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        store: Arc<dyn VectorSearch>,
        embedding_model: String,
    ) -> Self {
        Self {
            provider,
            store,
            embedding_model,
        }
    }
}

#[async_trait]
impl PassageRetriever for EmbeddingRetriever {
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<ScoredPassage>, ApiError> {
        let embeddings = self
            .provider
            .embed(&[query.to_string()], &self.embedding_model)
            .await?;

        let vector = embeddings.into_iter().next().ok_or_else(|| {
            ApiError::Upstream("embedding service returned no vector for the query".to_string())
        })?;

        self.store.search(&vector, top_k).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::llm::types::ChatRequest;

    struct FixedEmbedder {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LlmProvider for FixedEmbedder {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn chat(&self, _request: ChatRequest, _model_id: &str) -> Result<String, ApiError> {
            unreachable!("retriever must not issue chat calls")
        }

        async fn embed(
            &self,
            inputs: &[String],
            _model_id: &str,
        ) -> Result<Vec<Vec<f32>>, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(inputs.iter().map(|_| vec![0.1, 0.2, 0.3]).collect())
        }
    }

    struct RecordingStore {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl VectorSearch for RecordingStore {
        async fn search(
            &self,
            query_embedding: &[f32],
            limit: usize,
        ) -> Result<Vec<ScoredPassage>, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(query_embedding, &[0.1, 0.2, 0.3]);
            assert_eq!(limit, 10);
            Ok(vec![ScoredPassage {
                text: "hit".to_string(),
                score: 0.9,
            }])
        }
    }

    #[tokio::test]
    async fn embeds_query_then_searches_store() {
        let provider = Arc::new(FixedEmbedder {
            calls: AtomicUsize::new(0),
        });
        let store = Arc::new(RecordingStore {
            calls: AtomicUsize::new(0),
        });
        let retriever = EmbeddingRetriever::new(
            provider.clone(),
            store.clone(),
            "text-embedding-ada-002".to_string(),
        );

        let passages = retriever.search("what is lforge?", 10).await.unwrap();

        assert_eq!(passages.len(), 1);
        assert_eq!(passages[0].text, "hit");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }
}
