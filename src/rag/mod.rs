//! RAG (Retrieval-Augmented Generation) module.
//!
//! This module provides:
//! - `PassageRetriever` / `EmbeddingRetriever`: query embedding + similarity search
//! - `QdrantStore`: vector-store search over Qdrant's REST contract
//! - `QaEngine`: the question-answering flow (retrieve, threshold, prompt, complete)

pub mod context;
pub mod engine;
pub mod qdrant;
pub mod retriever;
pub mod store;

pub use engine::{QaEngine, QaOutcome, QaSettings};
pub use qdrant::QdrantStore;
pub use retriever::{EmbeddingRetriever, PassageRetriever};
pub use store::{ScoredPassage, VectorSearch};
