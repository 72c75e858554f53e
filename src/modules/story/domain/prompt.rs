use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;

pub const MIN_READING_MINUTES: u32 = 1;
pub const MAX_READING_MINUTES: u32 = 60;

/// Persona given to the text-generation model before every prompt
pub const STORYTELLER_PERSONA: &str = "You are a creative storyteller. Write original, \
engaging short stories with a clear beginning, middle and end. Answer with the story text only.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryPrompt {
    pub language: String,
    pub reading_time_minutes: u32,
    pub genre: String,
}

impl StoryPrompt {
    pub fn new(language: String, reading_time_minutes: u32, genre: String) -> Self {
        Self {
            language: language.trim().to_string(),
            reading_time_minutes,
            genre: genre.trim().to_string(),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        Validator::validate_required("Language", &self.language)?;
        Validator::validate_required("Genre", &self.genre)?;
        if !(MIN_READING_MINUTES..=MAX_READING_MINUTES).contains(&self.reading_time_minutes) {
            return Err(AppError::ValidationError(format!(
                "Reading time must be between {} and {} minutes",
                MIN_READING_MINUTES, MAX_READING_MINUTES
            )));
        }
        Ok(())
    }

    /// User message sent to the model
    pub fn instruction(&self) -> String {
        format!(
            "Write a {} story in {} that takes about {} minute{} to read.",
            self.genre,
            self.language,
            self.reading_time_minutes,
            if self.reading_time_minutes == 1 { "" } else { "s" }
        )
    }
}

/// Text-generation capability; failures surface as `ExternalServiceError`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoryGenerator: Send + Sync {
    async fn generate(&self, prompt: &StoryPrompt) -> AppResult<String>;
}
