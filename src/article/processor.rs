use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::prompts;
use crate::config::LlmConfig;
use crate::extractors::{join_captions, ExtractedVideo};
use crate::ArticleError;

/// Chat completion request body (OpenAI wire format)
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

/// Turns a transcript into a long-form article through one completion request
pub struct ArticleProcessor {
    client: Client,
    config: LlmConfig,
}

impl ArticleProcessor {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Rewrite the video's captions as a markdown article.
    ///
    /// One synchronous request-response exchange; transcripts longer than the
    /// model's context window fail upstream.
    pub async fn write_article(&self, video: &ExtractedVideo) -> Result<String> {
        let transcript = join_captions(&video.captions);
        if transcript.trim().is_empty() {
            return Err(ArticleError::EmptyTranscript.into());
        }

        let prompt = prompts::article_prompt(
            &transcript,
            &video.metadata.title,
            &video.metadata.channel,
        );

        tracing::info!(
            "Requesting article from model {} ({} transcript chars)",
            self.config.model,
            transcript.len()
        );

        let request = CompletionRequest {
            model: &self.config.model,
            messages: vec![
                Message { role: "system", content: prompts::SYSTEM_PROMPT },
                Message { role: "user", content: &prompt },
            ],
            temperature: self.config.temperature,
        };

        let endpoint = format!(
            "{}/chat/completions",
            self.config.api_base.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to reach the completion endpoint")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(upstream_error(status, &body).into());
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .context("Failed to parse completion response")?;

        extract_article(completion).map_err(Into::into)
    }
}

/// Pull the article text out of a parsed completion response
fn extract_article(completion: CompletionResponse) -> Result<String, ArticleError> {
    let article = completion
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .unwrap_or_default();

    if article.is_empty() {
        return Err(ArticleError::Upstream(
            "completion response contained no choices".to_string(),
        ));
    }

    Ok(article)
}

/// Shape a non-2xx completion response into an error with a readable excerpt
fn upstream_error(status: StatusCode, body: &str) -> ArticleError {
    let excerpt: String = body.chars().take(200).collect();
    ArticleError::Upstream(format!("HTTP {}: {}", status, excerpt.trim()))
}
