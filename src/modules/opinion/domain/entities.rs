use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;

pub const MIN_RATE: f64 = 1.0;
pub const MAX_RATE: f64 = 5.0;
pub const MAX_USER_NAME_LENGTH: usize = 100;

const POST_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A user-submitted review of a book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opinion {
    pub id: i32,
    pub rate: Option<f64>,
    pub view: String,
    pub user_name: String,
    pub post_date: String,
    pub book_id: i32,
}

/// Opinion about to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewOpinion {
    pub book_id: i32,
    pub rate: f64,
    pub view: String,
    pub user_name: String,
    pub post_date: String,
}

impl NewOpinion {
    pub fn new(book_id: i32, rate: f64, view: String, user_name: String) -> Self {
        Self {
            book_id,
            rate,
            view: view.trim().to_string(),
            user_name: user_name.trim().to_string(),
            post_date: Utc::now().format(POST_DATE_FORMAT).to_string(),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        Validator::validate_id("Book ID", self.book_id)?;
        Validator::validate_required("View", &self.view)?;
        Validator::validate_text("Username", &self.user_name, MAX_USER_NAME_LENGTH)?;
        validate_rate(self.rate)
    }
}

/// In-place edit of an existing opinion; `rate: None` keeps the stored rating
#[derive(Debug, Clone, PartialEq)]
pub struct OpinionChanges {
    pub rate: Option<f64>,
    pub view: String,
    pub user_name: String,
}

impl OpinionChanges {
    pub fn new(rate: Option<f64>, view: String, user_name: String) -> Self {
        Self {
            rate,
            view: view.trim().to_string(),
            user_name: user_name.trim().to_string(),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        Validator::validate_required("View", &self.view)?;
        Validator::validate_text("Username", &self.user_name, MAX_USER_NAME_LENGTH)?;
        match self.rate {
            Some(rate) => validate_rate(rate),
            None => Ok(()),
        }
    }
}

/// Outcome of a write that also refreshed the book's cached average
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpinionWrite {
    pub opinion: Opinion,
    pub average_rate: f64,
}

fn validate_rate(rate: f64) -> AppResult<()> {
    if !rate.is_finite() || !(MIN_RATE..=MAX_RATE).contains(&rate) {
        return Err(AppError::ValidationError(format!(
            "Rate must be between {} and {}",
            MIN_RATE, MAX_RATE
        )));
    }
    Ok(())
}
