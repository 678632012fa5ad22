use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::ArticleError;

/// Default OpenAI-compatible endpoint, overridable with OPENAI_BASE_URL.
const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Sampling temperature for article generation. Low randomness keeps the
/// article close to the transcript.
const ARTICLE_TEMPERATURE: f64 = 0.6;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Completion endpoint configuration
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key sent as a Bearer token
    pub api_key: String,

    /// Base URL of the OpenAI-compatible API
    pub api_base: String,

    /// Model name. No default, must be configured explicitly.
    pub model: String,

    /// Sampling temperature
    pub temperature: f64,
}

impl Config {
    /// Load configuration from the environment, once, at startup.
    ///
    /// Recognized variables: OPENAI_API_KEY (required), OPENAI_BASE_URL
    /// (optional), OPENAI_MODEL (required).
    pub fn from_env() -> Result<Self> {
        let config = Self {
            llm: LlmConfig {
                api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
                api_base: std::env::var("OPENAI_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
                model: std::env::var("OPENAI_MODEL").unwrap_or_default(),
                temperature: ARTICLE_TEMPERATURE,
            },
        };

        config.validate()?;
        tracing::debug!(
            "Using model {} at {} (temperature {})",
            config.llm.model,
            config.llm.api_base,
            config.llm.temperature
        );
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.llm.api_key.is_empty() {
            return Err(ArticleError::MissingConfig(
                "OPENAI_API_KEY is not set".to_string(),
            )
            .into());
        }

        if self.llm.model.is_empty() {
            return Err(ArticleError::MissingConfig(
                "OPENAI_MODEL is not set (no default model is assumed)".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
