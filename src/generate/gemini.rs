//! Gemini-backed generator
//!
//! Thin HTTP client for the `generateContent` endpoint. Generation
//! parameters mirror what the deployment has been tuned with; the response
//! mime type is pinned to JSON so the model answers in parseable form.

use crate::error::{CacheError, Result};
use crate::generate::Generator;
use serde_json::{json, Value};
use tracing::debug;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Generator backed by the Gemini API.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Create a client for the given model
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Create a client from the `GEMINI_API_KEY` environment variable,
    /// loading `.env` first if present
    pub fn from_env(model: impl Into<String>) -> Result<Self> {
        dotenv::dotenv().ok();
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| CacheError::Config("GEMINI_API_KEY is not set".to_string()))?;
        Ok(Self::new(api_key, model))
    }
}

impl Generator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{API_BASE}/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let body = json!({
            "contents": [{"parts": [{"text": prompt}]}],
            "generationConfig": {
                "temperature": 1.0,
                "topP": 0.95,
                "topK": 39,
                "maxOutputTokens": 8192,
                "responseMimeType": "application/json",
            }
        });

        debug!(model = %self.model, "calling generator");
        let response = self.http.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CacheError::Transport(format!(
                "generator returned HTTP {status}"
            )));
        }

        let envelope: Value = response.json().await?;
        let text = envelope
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                CacheError::Transport("generator response contained no text".to_string())
            })?;

        Ok(text.to_string())
    }
}
