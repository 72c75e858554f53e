use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::modules::story::domain::{StoryGenerator, StoryPrompt, STORYTELLER_PERSONA};
use crate::shared::config::AiConfig;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::LogContext;

const REQUEST_TIMEOUT_SECS: u64 = 60;
const USER_AGENT: &str = concat!("bookshelf/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Story generator backed by an OpenAI-compatible chat-completions endpoint
pub struct OpenAiStoryGenerator {
    client: reqwest::Client,
    config: AiConfig,
}

impl OpenAiStoryGenerator {
    pub fn new(config: AiConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl StoryGenerator for OpenAiStoryGenerator {
    async fn generate(&self, prompt: &StoryPrompt) -> AppResult<String> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            AppError::ExternalServiceError("Story generation is not configured".to_string())
        })?;

        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: STORYTELLER_PERSONA.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt.instruction(),
                },
            ],
        };

        let endpoint = self.endpoint();
        LogContext::api_call("openai", &endpoint, "sending", None);
        let started = Instant::now();

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            LogContext::api_call(
                "openai",
                &endpoint,
                status.as_str(),
                Some(started.elapsed().as_millis() as u64),
            );
            return Err(AppError::ExternalServiceError(format!(
                "Story generation failed with HTTP {}: {}",
                status, detail
            )));
        }

        let payload: ChatResponse = response.json().await?;
        LogContext::api_call(
            "openai",
            &endpoint,
            "ok",
            Some(started.elapsed().as_millis() as u64),
        );
        extract_story(payload)
    }
}

fn extract_story(payload: ChatResponse) -> AppResult<String> {
    payload
        .choices
        .into_iter()
        .filter_map(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .find(|content| !content.is_empty())
        .ok_or_else(|| {
            AppError::ExternalServiceError("Story generation returned no text".to_string())
        })
}
