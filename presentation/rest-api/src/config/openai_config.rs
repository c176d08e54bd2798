use std::time::Duration;

use anyhow::Context;
use openai::client::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Configuration for OpenAI API access.
///
/// Environment variables:
/// - OPENAI_API_KEY: API key (required)
/// - OPENAI_MODEL: chat model (default: "gpt-4o-mini")
/// - OPENAI_BASE_URL: API root (default: "https://api.openai.com/v1")
/// - OPENAI_TIMEOUT_SECS: per-request timeout (default: 30)
pub struct OpenAIConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl OpenAIConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .context("OPENAI_API_KEY environment variable must be set")?;
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout = std::env::var("OPENAI_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        Ok(Self {
            api_key,
            model,
            base_url,
            timeout,
        })
    }
}
