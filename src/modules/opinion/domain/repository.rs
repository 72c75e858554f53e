use async_trait::async_trait;

use super::entities::{NewOpinion, Opinion, OpinionChanges, OpinionWrite};
use crate::shared::errors::AppResult;

/// Port for opinion persistence.
///
/// Writes refresh the owning book's cached average rate in the same
/// transaction as the opinion row.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OpinionRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Opinion>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Opinion>>;

    async fn find_by_book(&self, book_id: i32) -> AppResult<Vec<Opinion>>;

    /// Insert the opinion and recompute its book's average rate
    async fn create(&self, opinion: NewOpinion) -> AppResult<OpinionWrite>;

    /// Update the opinion in place and recompute its book's average rate
    async fn update(&self, id: i32, changes: OpinionChanges) -> AppResult<OpinionWrite>;

    /// Recompute and persist the average rate; `None` when the book does not exist
    async fn refresh_average(&self, book_id: i32) -> AppResult<Option<f64>>;
}
