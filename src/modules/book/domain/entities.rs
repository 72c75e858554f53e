use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::modules::opinion::domain::Opinion;
use crate::shared::errors::AppResult;
use crate::shared::utils::Validator;

pub const MAX_TITLE_LENGTH: usize = 255;
pub const MAX_AUTHOR_LENGTH: usize = 255;
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub creation_date: DateTime<Utc>,
    pub average_rate: Option<f64>,
    pub genre_id: Option<i32>,
    pub opinions: Vec<Opinion>,
}

impl Book {
    /// Opinions whose rating reaches `threshold`
    pub fn opinions_rated_at_least(&self, threshold: f64) -> impl Iterator<Item = &Opinion> {
        self.opinions
            .iter()
            .filter(move |opinion| opinion.rate.is_some_and(|rate| rate >= threshold))
    }
}

/// Editable book fields, shared by create and full update
#[derive(Debug, Clone, PartialEq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub genre_id: Option<i32>,
}

impl BookDraft {
    pub fn new(
        title: String,
        author: String,
        description: Option<String>,
        image_url: Option<String>,
        genre_id: Option<i32>,
    ) -> Self {
        Self {
            title: title.trim().to_string(),
            author: author.trim().to_string(),
            description: description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            image_url: image_url
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
            // 0 is the legacy "no genre" marker
            genre_id: genre_id.filter(|id| *id != 0),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        Validator::validate_text("Title", &self.title, MAX_TITLE_LENGTH)?;
        Validator::validate_text("Author", &self.author, MAX_AUTHOR_LENGTH)?;
        if let Some(description) = &self.description {
            Validator::validate_max_length("Description", description, MAX_DESCRIPTION_LENGTH)?;
        }
        if let Some(genre_id) = self.genre_id {
            Validator::validate_id("Genre ID", genre_id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_normalizes_optional_fields() {
        let draft = BookDraft::new(
            " Dune ".into(),
            "Frank Herbert".into(),
            Some("   ".into()),
            Some("".into()),
            Some(0),
        );
        assert_eq!(draft.title, "Dune");
        assert!(draft.description.is_none());
        assert!(draft.image_url.is_none());
        assert!(draft.genre_id.is_none());
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn long_description_is_rejected() {
        let draft = BookDraft::new(
            "Dune".into(),
            "Frank Herbert".into(),
            Some("x".repeat(MAX_DESCRIPTION_LENGTH + 1)),
            None,
            None,
        );
        assert!(draft.validate().is_err());
    }

    #[test]
    fn title_and_author_are_required() {
        assert!(BookDraft::new("".into(), "A".into(), None, None, None)
            .validate()
            .is_err());
        assert!(BookDraft::new("T".into(), " ".into(), None, None, None)
            .validate()
            .is_err());
    }
}
