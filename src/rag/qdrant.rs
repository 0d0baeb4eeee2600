//! Qdrant vector store client.
//!
//! Talks to a Qdrant server over its public REST search endpoint
//! (`POST /collections/{name}/points/search`). Passage text lives in the
//! `text` payload field; hits without it are skipped with a warning.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::store::{ScoredPassage, VectorSearch};
use crate::core::errors::ApiError;

#[derive(Clone)]
pub struct QdrantStore {
    base_url: String,
    api_key: Option<String>,
    collection: String,
    client: Client,
}

impl QdrantStore {
    pub fn new(base_url: String, api_key: Option<String>, collection: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            collection,
            client: Client::new(),
        }
    }
}

fn parse_search_response(payload: &Value) -> Result<Vec<ScoredPassage>, ApiError> {
    let hits = payload["result"]
        .as_array()
        .ok_or_else(|| ApiError::Upstream("qdrant response had no result array".to_string()))?;

    let mut passages = Vec::with_capacity(hits.len());
    for hit in hits {
        let score = hit["score"].as_f64().ok_or_else(|| {
            ApiError::Upstream("qdrant hit had no numeric score".to_string())
        })? as f32;

        match hit["payload"]["text"].as_str() {
            Some(text) => passages.push(ScoredPassage {
                text: text.to_string(),
                score,
            }),
            None => {
                tracing::warn!("skipping qdrant hit without a text payload field");
            }
        }
    }

    Ok(passages)
}

#[async_trait]
impl VectorSearch for QdrantStore {
    async fn search(
        &self,
        query_embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredPassage>, ApiError> {
        let url = format!(
            "{}/collections/{}/points/search",
            self.base_url, self.collection
        );
        let body = json!({
            "vector": query_embedding,
            "limit": limit,
            "with_payload": true,
        });

        let mut req = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            req = req.header("api-key", key);
        }

        let res = req.send().await.map_err(ApiError::upstream)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(ApiError::Upstream(format!(
                "qdrant search failed ({}): {}",
                status, text
            )));
        }

        let payload: Value = res.json().await.map_err(ApiError::upstream)?;
        parse_search_response(&payload)
    }
}
