use crate::modules::book::domain::Book;
use crate::modules::genre::domain::{Genre, GenreChanges, GenreDraft};
use crate::schema::genres;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = genres)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct GenreModel {
    pub id: i32,
    pub name: String,
    pub is_for_story_generation: bool,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = genres)]
pub struct NewGenreModel {
    pub name: String,
    pub is_for_story_generation: bool,
}

// A `None` flag leaves the column untouched
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = genres)]
pub struct GenreChangeset {
    pub name: String,
    pub is_for_story_generation: Option<bool>,
}

impl GenreModel {
    pub fn into_entity(self, books: Option<Vec<Book>>) -> Genre {
        Genre {
            id: self.id,
            name: self.name,
            is_for_story_generation: self.is_for_story_generation,
            books,
        }
    }
}

impl From<GenreDraft> for NewGenreModel {
    fn from(draft: GenreDraft) -> Self {
        Self {
            name: draft.name,
            is_for_story_generation: draft.is_for_story_generation,
        }
    }
}

impl From<GenreChanges> for GenreChangeset {
    fn from(changes: GenreChanges) -> Self {
        Self {
            name: changes.name,
            is_for_story_generation: changes.is_for_story_generation,
        }
    }
}
