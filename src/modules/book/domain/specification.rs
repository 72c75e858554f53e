use std::str::FromStr;

use crate::shared::errors::AppError;

/// Literal accepted in place of a genre id list
pub const ALL_GENRES: &str = "All";

/// Genre restriction parsed from a comma-separated id list or `All`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenreFilter {
    /// Every book that has a genre
    All,
    /// Books whose genre id is in the set
    Ids(Vec<i32>),
}

impl FromStr for GenreFilter {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw == ALL_GENRES {
            return Ok(GenreFilter::All);
        }

        raw.split(',')
            .map(|token| token.trim().parse::<i32>())
            .collect::<Result<Vec<_>, _>>()
            .map(GenreFilter::Ids)
            .map_err(|_| {
                AppError::ValidationError("Genre list contains invalid entries".to_string())
            })
    }
}

/// Filters applied to book queries (Specification Pattern)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookSpecification {
    pub genre: Option<GenreFilter>,
    /// Lower-cased, trimmed needle matched against title or author
    pub title_or_author: Option<String>,
}

impl BookSpecification {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_genres(filter: GenreFilter) -> Self {
        Self {
            genre: Some(filter),
            ..Self::default()
        }
    }

    /// Returns `None` when the needle is blank
    pub fn title_or_author(needle: &str) -> Option<Self> {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        Some(Self {
            title_or_author: Some(needle),
            ..Self::default()
        })
    }

    /// `ILIKE` pattern for the text search, wildcards escaped with `\`
    pub fn search_pattern(&self) -> Option<String> {
        self.title_or_author.as_ref().map(|needle| {
            let mut escaped = String::with_capacity(needle.len() + 2);
            escaped.push('%');
            for c in needle.chars() {
                if matches!(c, '%' | '_' | '\\') {
                    escaped.push('\\');
                }
                escaped.push(c);
            }
            escaped.push('%');
            escaped
        })
    }
}
