//! Question-answering engine.
//!
//! One invocation is one linear pass: retrieve, threshold check, assemble
//! prompt, complete. Exactly one retrieval call and at most one completion
//! call per question; no caching, no retry, no state across invocations.

use std::sync::Arc;

use super::context::{build_context, render_prompt};
use super::retriever::PassageRetriever;
use crate::core::errors::ApiError;
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};

/// Retrieval parameters for the QA flow.
#[derive(Debug, Clone)]
pub struct QaSettings {
    /// Number of passages requested from the retriever.
    pub top_k: usize,
    /// Minimum best-passage relevance score; strictly below means no answer.
    pub score_threshold: f32,
}

impl Default for QaSettings {
    fn default() -> Self {
        Self {
            top_k: 10,
            score_threshold: 0.7,
        }
    }
}

/// Outcome of one question.
#[derive(Debug, Clone, PartialEq)]
pub enum QaOutcome {
    Answered(String),
    /// Nothing in the store was relevant enough; no completion call was made.
    NoRelevantMatch,
}

pub struct QaEngine {
    retriever: Arc<dyn PassageRetriever>,
    llm: Arc<dyn LlmProvider>,
    chat_model: String,
    settings: QaSettings,
}

impl QaEngine {
    pub fn new(
        retriever: Arc<dyn PassageRetriever>,
        llm: Arc<dyn LlmProvider>,
        chat_model: String,
        settings: QaSettings,
    ) -> Self {
        Self {
            retriever,
            llm,
            chat_model,
            settings,
        }
    }

    pub async fn answer(&self, question: &str) -> Result<QaOutcome, ApiError> {
        let passages = self
            .retriever
            .search(question, self.settings.top_k)
            .await?;

        let best_score = passages
            .iter()
            .map(|p| p.score)
            .fold(f32::NEG_INFINITY, f32::max);

        if passages.is_empty() || best_score < self.settings.score_threshold {
            tracing::info!(
                best_score,
                threshold = self.settings.score_threshold,
                "unable to find matching results"
            );
            return Ok(QaOutcome::NoRelevantMatch);
        }

        let context = build_context(&passages);
        let prompt = render_prompt(&context, question);

        let request = ChatRequest::new(vec![ChatMessage::user(prompt)]);
        let answer = self.llm.chat(request, &self.chat_model).await?;

        Ok(QaOutcome::Answered(answer))
    }
}
