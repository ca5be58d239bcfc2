// api interaction module - handles gemini api communication

use crate::config::Config;
use crate::error::HelperError;
use crate::ui;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::prompts::build_prompt;

/// produces a commit message for a diff
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageGenerator: Send + Sync {
    async fn generate(&self, diff: &str) -> Result<String>;
}

// gemini generateContent structures
#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize, Default)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// generator backed by the gemini rest api
pub struct GeminiGenerator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiGenerator {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("failed to build http client")?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            endpoint: format!(
                "{}/models/{}:generateContent",
                config.api_base, config.model
            ),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn request(&self, prompt: String) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| HelperError::Generation(format!("request to gemini failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| {
                    if envelope.error.status.is_empty() {
                        envelope.error.message
                    } else {
                        format!("{}: {}", envelope.error.status, envelope.error.message)
                    }
                })
                .unwrap_or(body);
            return Err(HelperError::Generation(format!("gemini api error ({status}): {detail}")).into());
        }

        let body = response
            .json::<GenerateResponse>()
            .await
            .map_err(|e| HelperError::Generation(format!("failed to parse gemini response: {e}")))?;

        let text = body
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        let message = text.trim();
        if message.is_empty() {
            return Err(HelperError::EmptyResponse.into());
        }
        Ok(message.to_string())
    }
}

#[async_trait]
impl MessageGenerator for GeminiGenerator {
    async fn generate(&self, diff: &str) -> Result<String> {
        let prompt = build_prompt(diff);
        debug!(model = %self.model, prompt_chars = prompt.chars().count(), "requesting commit message");

        let spinner = ui::spinner(format!("🧙 generating commit message with {}...", self.model));
        let result = self.request(prompt).await;
        spinner.finish_and_clear();

        result
    }
}
