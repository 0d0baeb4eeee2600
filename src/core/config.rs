//! Service configuration.
//!
//! Everything comes from the environment at process start. Credentials are
//! never stored in code or on disk; the two API keys are read once here and
//! held in memory for the lifetime of the process.

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";
const DEFAULT_QDRANT_URL: &str = "http://127.0.0.1:6333";
const DEFAULT_COLLECTION: &str = "lforge_docs";
const DEFAULT_TOP_K: usize = 10;
const DEFAULT_SCORE_THRESHOLD: f32 = 0.7;
const DEFAULT_LOG_DIR: &str = "./logs";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub openai_base_url: String,
    pub openai_api_key: String,
    pub chat_model: String,
    pub embedding_model: String,
    pub qdrant_url: String,
    pub qdrant_api_key: Option<String>,
    pub collection: String,
    pub top_k: usize,
    pub score_threshold: f32,
    pub log_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    ///
    /// `from_env` delegates here; tests supply a map instead of mutating
    /// the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let openai_api_key = lookup("OPENAI_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .context("OPENAI_API_KEY is not set")?;

        let port = parse_or("PORT", DEFAULT_PORT, &lookup)?;
        let top_k = parse_or("LFORGE_QA_TOP_K", DEFAULT_TOP_K, &lookup)?;
        let score_threshold =
            parse_or("LFORGE_QA_SCORE_THRESHOLD", DEFAULT_SCORE_THRESHOLD, &lookup)?;

        if top_k == 0 {
            bail!("LFORGE_QA_TOP_K must be at least 1");
        }
        if !(0.0..=1.0).contains(&score_threshold) {
            bail!("LFORGE_QA_SCORE_THRESHOLD must be within [0.0, 1.0]");
        }

        Ok(AppConfig {
            port,
            openai_base_url: string_or("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL, &lookup),
            openai_api_key,
            chat_model: string_or("LFORGE_QA_CHAT_MODEL", DEFAULT_CHAT_MODEL, &lookup),
            embedding_model: string_or(
                "LFORGE_QA_EMBEDDING_MODEL",
                DEFAULT_EMBEDDING_MODEL,
                &lookup,
            ),
            qdrant_url: string_or("QDRANT_URL", DEFAULT_QDRANT_URL, &lookup),
            qdrant_api_key: lookup("QDRANT_API_KEY").filter(|v| !v.trim().is_empty()),
            collection: string_or("LFORGE_QA_COLLECTION", DEFAULT_COLLECTION, &lookup),
            top_k,
            score_threshold,
            log_dir: PathBuf::from(string_or("LFORGE_QA_LOG_DIR", DEFAULT_LOG_DIR, &lookup)),
        })
    }
}

fn string_or(key: &str, default: &str, lookup: &impl Fn(&str) -> Option<String>) -> String {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_or<T: std::str::FromStr>(
    key: &str,
    default: T,
    lookup: &impl Fn(&str) -> Option<String>,
) -> anyhow::Result<T> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| anyhow::anyhow!("{} has an invalid value: {:?}", key, raw)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("OPENAI_API_KEY", "sk-test")])).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.top_k, 10);
        assert_eq!(config.score_threshold, 0.7);
        assert_eq!(config.chat_model, "gpt-3.5-turbo");
        assert_eq!(config.embedding_model, "text-embedding-ada-002");
        assert_eq!(config.collection, "lforge_docs");
        assert_eq!(config.qdrant_url, "http://127.0.0.1:6333");
        assert!(config.qdrant_api_key.is_none());
    }

    #[test]
    fn missing_api_key_fails() {
        assert!(AppConfig::from_lookup(lookup_from(&[])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[("OPENAI_API_KEY", "  ")])).is_err());
    }

    #[test]
    fn overrides_are_respected() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("PORT", "9000"),
            ("LFORGE_QA_TOP_K", "5"),
            ("LFORGE_QA_SCORE_THRESHOLD", "0.5"),
            ("QDRANT_API_KEY", "qd-secret"),
        ]))
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.top_k, 5);
        assert_eq!(config.score_threshold, 0.5);
        assert_eq!(config.qdrant_api_key.as_deref(), Some("qd-secret"));
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let base = [("OPENAI_API_KEY", "sk-test")];

        let mut pairs = base.to_vec();
        pairs.push(("LFORGE_QA_TOP_K", "zero"));
        assert!(AppConfig::from_lookup(lookup_from(&pairs)).is_err());

        let mut pairs = base.to_vec();
        pairs.push(("LFORGE_QA_TOP_K", "0"));
        assert!(AppConfig::from_lookup(lookup_from(&pairs)).is_err());

        let mut pairs = base.to_vec();
        pairs.push(("LFORGE_QA_SCORE_THRESHOLD", "1.5"));
        assert!(AppConfig::from_lookup(lookup_from(&pairs)).is_err());
    }
}
