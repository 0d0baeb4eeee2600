//! One-shot sentiment analysis against an OpenAI-compatible chat endpoint.
//!
//! Reads the text to analyze from stdin and prints the model's JSON verdict.
//! Defaults target Groq's hosted llama3-8b-8192; the key comes from the
//! environment, never from code.

use std::env;
use std::io::Read;

use anyhow::{bail, Context};
use serde_json::{json, Value};

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai";
const DEFAULT_MODEL: &str = "llama3-8b-8192";

const SCHEMA_PROMPT: &str = r#"You are a data analyst API capable of sentiment analysis that responds in JSON. The JSON schema should include
{
  "sentiment_analysis": {
    "sentiment": "string (positive, negative, neutral)",
    "confidence_score": "number (0-1)"
  }
}"#;

fn request_body(model: &str, text: &str) -> Value {
    json!({
        "model": model,
        "messages": [
            {
                "role": "user",
                "content": format!("{}\n\nText to analyze:\n{}", SCHEMA_PROMPT, text),
            }
        ],
        "temperature": 1,
        "max_tokens": 1024,
        "top_p": 1,
        "stream": false,
        "response_format": { "type": "json_object" },
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let api_key = env::var("SENTIMENT_API_KEY").context("SENTIMENT_API_KEY is not set")?;
    let base_url =
        env::var("SENTIMENT_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let model = env::var("SENTIMENT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("failed to read stdin")?;
    let text = text.trim();
    if text.is_empty() {
        bail!("no input text on stdin");
    }

    let url = format!("{}/v1/chat/completions", base_url.trim_end_matches('/'));
    let res = reqwest::Client::new()
        .post(&url)
        .bearer_auth(&api_key)
        .json(&request_body(&model, text))
        .send()
        .await
        .context("sentiment request failed")?;

    if !res.status().is_success() {
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        bail!("sentiment request failed ({}): {}", status, body);
    }

    let payload: Value = res.json().await.context("invalid response body")?;
    let content = payload["choices"][0]["message"]["content"]
        .as_str()
        .context("response had no message content")?;

    println!("{}", content);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_asks_for_json_mode() {
        let body = request_body("llama3-8b-8192", "great product");

        assert_eq!(body["model"], "llama3-8b-8192");
        assert_eq!(body["response_format"]["type"], "json_object");
        assert_eq!(body["stream"], false);

        let content = body["messages"][0]["content"].as_str().unwrap();
        assert!(content.contains("sentiment_analysis"));
        assert!(content.ends_with("Text to analyze:\ngreat product"));
    }
}
