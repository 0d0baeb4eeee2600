//! VectorSearch trait — abstract interface over the external vector store.
//!
//! The store owns indexing and persistence; this service only consumes its
//! public similarity-search contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::errors::ApiError;

/// One similarity-search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPassage {
    /// The stored passage text, returned verbatim.
    pub text: String,
    /// Relevance score in [0, 1]; higher is better.
    pub score: f32,
}

/// Abstract trait for vector-store backends.
///
/// Implementations must return results ordered by descending score.
#[async_trait]
pub trait VectorSearch: Send + Sync {
    /// Search for passages similar to the query embedding.
    async fn search(
        &self,
        query_embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredPassage>, ApiError>;
}
