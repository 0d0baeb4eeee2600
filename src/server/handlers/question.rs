//! The `/question` route.
//!
//! A malformed or missing body is rejected by the JSON extractor before any
//! collaborator is contacted; an empty question is rejected here for the same
//! reason. The no-match outcome maps to 404 with a diagnostic body — the one
//! deliberately chosen contract for a path the original left undefined.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::core::errors::ApiError;
use crate::rag::QaOutcome;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub answer: String,
}

pub async fn ask(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QuestionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let question = req.question.trim();
    if question.is_empty() {
        return Err(ApiError::BadRequest(
            "question must not be empty".to_string(),
        ));
    }

    match state.engine.answer(question).await? {
        QaOutcome::Answered(answer) => Ok(Json(AnswerResponse { answer })),
        QaOutcome::NoRelevantMatch => Err(ApiError::NotFound(
            "no sufficiently relevant context found".to_string(),
        )),
    }
}
