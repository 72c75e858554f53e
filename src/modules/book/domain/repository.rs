use async_trait::async_trait;

use super::entities::{Book, BookDraft};
use super::specification::BookSpecification;
use crate::shared::{
    application::pagination::{PaginatedResult, PaginationParams},
    errors::AppResult,
};

/// Port for book persistence. Every returned book carries its opinions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Page of books matching the specification, newest id first
    async fn find_page(
        &self,
        specification: BookSpecification,
        pagination: PaginationParams,
    ) -> AppResult<PaginatedResult<Book>>;

    /// Every book matching the specification, newest id first
    async fn find_all_matching(&self, specification: BookSpecification) -> AppResult<Vec<Book>>;

    /// Books with at least one opinion rated `threshold` or higher
    async fn find_with_opinions_rated_at_least(&self, threshold: f64) -> AppResult<Vec<Book>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>>;

    async fn exists(&self, id: i32) -> AppResult<bool>;

    async fn create(&self, draft: BookDraft) -> AppResult<Book>;

    /// Replace the editable fields; `NotFound` when the book is missing
    async fn update(&self, id: i32, draft: BookDraft) -> AppResult<Book>;

    /// Delete the book and, through the foreign key, its opinions
    async fn delete(&self, id: i32) -> AppResult<()>;
}
