use std::sync::Arc;

use crate::log_info;
use crate::modules::book::domain::BookRepository;
use crate::modules::opinion::domain::{
    NewOpinion, Opinion, OpinionChanges, OpinionRepository, OpinionWrite,
};
use crate::shared::errors::{AppError, AppResult};

pub struct OpinionService {
    opinion_repo: Arc<dyn OpinionRepository>,
    book_repo: Arc<dyn BookRepository>,
}

impl OpinionService {
    pub fn new(
        opinion_repo: Arc<dyn OpinionRepository>,
        book_repo: Arc<dyn BookRepository>,
    ) -> Self {
        Self {
            opinion_repo,
            book_repo,
        }
    }

    pub async fn get_all(&self) -> AppResult<Vec<Opinion>> {
        self.opinion_repo.find_all().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Opinion> {
        self.opinion_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Opinion with ID {} not found", id)))
    }

    pub async fn get_by_book(&self, book_id: i32) -> AppResult<Vec<Opinion>> {
        self.ensure_book_exists(book_id).await?;
        self.opinion_repo.find_by_book(book_id).await
    }

    /// Validates, then stores the opinion and refreshes the book's average
    pub async fn create(&self, opinion: NewOpinion) -> AppResult<OpinionWrite> {
        opinion.validate()?;
        self.ensure_book_exists(opinion.book_id).await?;

        let write = self.opinion_repo.create(opinion).await?;
        log_info!(
            "Opinion {} added to book {} (average now {})",
            write.opinion.id,
            write.opinion.book_id,
            write.average_rate
        );
        Ok(write)
    }

    pub async fn update(&self, id: i32, changes: OpinionChanges) -> AppResult<OpinionWrite> {
        changes.validate()?;
        self.opinion_repo.update(id, changes).await
    }

    /// Recompute the stored average; 0.0 means the book has no opinions
    pub async fn average_rate(&self, book_id: i32) -> AppResult<f64> {
        self.opinion_repo
            .refresh_average(book_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with ID {} not found", book_id)))
    }

    async fn ensure_book_exists(&self, book_id: i32) -> AppResult<()> {
        if !self.book_repo.exists(book_id).await? {
            return Err(AppError::NotFound(format!(
                "Book with ID {} not found",
                book_id
            )));
        }
        Ok(())
    }
}
