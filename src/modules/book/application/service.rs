use std::sync::Arc;

use crate::modules::book::domain::{
    rank_most_popular, Book, BookDraft, BookRepository, BookSpecification, GenreFilter,
    GOOD_OPINION_THRESHOLD,
};
use crate::shared::application::pagination::{PaginatedResult, PaginationParams};
use crate::shared::errors::{AppError, AppResult};
use crate::{log_debug, log_info};

/// Upper bound for the "most popular" listing
pub const MAX_TOP_BOOKS: usize = 100;

pub struct BookService {
    book_repo: Arc<dyn BookRepository>,
}

impl BookService {
    pub fn new(book_repo: Arc<dyn BookRepository>) -> Self {
        Self { book_repo }
    }

    /// Newest books first; an empty library is reported as `NotFound`
    pub async fn list_books(&self, pagination: PaginationParams) -> AppResult<PaginatedResult<Book>> {
        let page = self
            .book_repo
            .find_page(BookSpecification::all(), pagination)
            .await?;

        if page.is_empty() {
            return Err(AppError::NotFound("No books found".to_string()));
        }
        Ok(page)
    }

    /// Books in the given genres (`"All"` or comma-separated ids), paginated
    pub async fn list_books_by_genres(
        &self,
        genre_ids: &str,
        pagination: PaginationParams,
    ) -> AppResult<PaginatedResult<Book>> {
        let filter: GenreFilter = genre_ids.parse()?;
        log_debug!("Listing books for genre filter {:?}", filter);

        self.book_repo
            .find_page(BookSpecification::with_genres(filter), pagination)
            .await
    }

    pub async fn search_by_title_or_author(&self, needle: &str) -> AppResult<Vec<Book>> {
        let specification = BookSpecification::title_or_author(needle).ok_or_else(|| {
            AppError::ValidationError("Title or author cannot be empty".to_string())
        })?;

        let books = self.book_repo.find_all_matching(specification).await?;
        if books.is_empty() {
            return Err(AppError::NotFound(format!(
                "No books match '{}'",
                needle.trim()
            )));
        }
        Ok(books)
    }

    pub async fn top_books(&self, number_of_books: i64) -> AppResult<Vec<Book>> {
        if number_of_books < 1 || number_of_books > MAX_TOP_BOOKS as i64 {
            return Err(AppError::ValidationError(format!(
                "Number of books must be between 1 and {}",
                MAX_TOP_BOOKS
            )));
        }

        let candidates = self
            .book_repo
            .find_with_opinions_rated_at_least(GOOD_OPINION_THRESHOLD)
            .await?;

        let ranked = rank_most_popular(candidates, number_of_books as usize);
        if ranked.is_empty() {
            return Err(AppError::NotFound("No rated books found".to_string()));
        }
        Ok(ranked)
    }

    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.book_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with ID {} not found", id)))
    }

    pub async fn create_book(&self, draft: BookDraft) -> AppResult<Book> {
        draft.validate()?;

        let book = self.book_repo.create(draft).await?;
        log_info!("Created book {} '{}'", book.id, book.title);
        Ok(book)
    }

    pub async fn update_book(&self, id: i32, draft: BookDraft) -> AppResult<Book> {
        draft.validate()?;

        let book = self.book_repo.update(id, draft).await?;
        log_info!("Updated book {}", id);
        Ok(book)
    }

    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.book_repo.delete(id).await?;
        log_info!("Deleted book {} and its opinions", id);
        Ok(())
    }
}
