use serde::{Deserialize, Serialize};

use crate::modules::book::domain::Book;
use crate::shared::errors::AppResult;
use crate::shared::utils::Validator;

pub const MAX_NAME_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Genre {
    pub id: i32,
    pub name: String,
    pub is_for_story_generation: bool,
    /// Only populated when books were requested
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub books: Option<Vec<Book>>,
}

/// Fields for a new genre; the story flag defaults to `true`
#[derive(Debug, Clone, PartialEq)]
pub struct GenreDraft {
    pub name: String,
    pub is_for_story_generation: bool,
}

impl GenreDraft {
    pub fn new(name: String, is_for_story_generation: Option<bool>) -> Self {
        Self {
            name: name.trim().to_string(),
            is_for_story_generation: is_for_story_generation.unwrap_or(true),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        Validator::validate_text("Name", &self.name, MAX_NAME_LENGTH)
    }
}

/// Edit of an existing genre; `None` keeps the stored story flag
#[derive(Debug, Clone, PartialEq)]
pub struct GenreChanges {
    pub name: String,
    pub is_for_story_generation: Option<bool>,
}

impl GenreChanges {
    pub fn new(name: String, is_for_story_generation: Option<bool>) -> Self {
        Self {
            name: name.trim().to_string(),
            is_for_story_generation,
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        Validator::validate_text("Name", &self.name, MAX_NAME_LENGTH)
    }
}

/// Ordinal (byte-wise, case-sensitive) ordering by name, ties by id
pub fn sort_by_name(genres: &mut [Genre]) {
    genres.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
}
