use async_trait::async_trait;

use super::entities::{Genre, GenreChanges, GenreDraft};
use crate::shared::errors::AppResult;

/// Port for genre persistence. `include_books` eager-loads books with their opinions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenreRepository: Send + Sync {
    async fn find_all(&self, include_books: bool) -> AppResult<Vec<Genre>>;

    async fn find_by_id(&self, id: i32, include_books: bool) -> AppResult<Option<Genre>>;

    /// Genres flagged as eligible for story generation
    async fn find_for_story_generation(&self) -> AppResult<Vec<Genre>>;

    async fn create(&self, draft: GenreDraft) -> AppResult<Genre>;

    /// `NotFound` when the genre is missing
    async fn update(&self, id: i32, changes: GenreChanges) -> AppResult<Genre>;

    /// Books of a deleted genre keep existing without a genre
    async fn delete(&self, id: i32) -> AppResult<()>;
}
