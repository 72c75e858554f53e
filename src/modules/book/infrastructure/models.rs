use crate::modules::book::domain::{Book, BookDraft};
use crate::modules::genre::infrastructure::models::GenreModel;
use crate::modules::opinion::domain::Opinion;
use crate::schema::books;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

// ============= BOOK MODELS =============

// For reading from database - with associations support
#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone)]
#[diesel(belongs_to(GenreModel, foreign_key = genre_id))]
#[diesel(table_name = books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BookModel {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub creation_date: DateTime<Utc>,
    pub average_rate: Option<f64>,
    pub genre_id: Option<i32>,
}

// For inserting new books
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = books)]
pub struct NewBookModel {
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub creation_date: DateTime<Utc>,
    pub genre_id: Option<i32>,
}

// Full replacement of the editable columns (excludes id, creation_date, average_rate)
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = books)]
#[diesel(treat_none_as_null = true)]
pub struct BookChangeset {
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub genre_id: Option<i32>,
}

impl BookModel {
    pub fn into_entity(self, opinions: Vec<Opinion>) -> Book {
        Book {
            id: self.id,
            title: self.title,
            author: self.author,
            description: self.description,
            image_url: self.image_url,
            creation_date: self.creation_date,
            average_rate: self.average_rate,
            genre_id: self.genre_id,
            opinions,
        }
    }
}

impl From<BookDraft> for NewBookModel {
    fn from(draft: BookDraft) -> Self {
        Self {
            title: draft.title,
            author: draft.author,
            description: draft.description,
            image_url: draft.image_url,
            creation_date: Utc::now(),
            genre_id: draft.genre_id,
        }
    }
}

impl From<BookDraft> for BookChangeset {
    fn from(draft: BookDraft) -> Self {
        Self {
            title: draft.title,
            author: draft.author,
            description: draft.description,
            image_url: draft.image_url,
            genre_id: draft.genre_id,
        }
    }
}
