use std::sync::Arc;

use async_trait::async_trait;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;

use super::models::{BookChangeset, BookModel, NewBookModel};
use crate::modules::book::domain::{Book, BookDraft, BookRepository, BookSpecification, GenreFilter};
use crate::modules::opinion::domain::Opinion;
use crate::modules::opinion::infrastructure::models::OpinionModel;
use crate::schema::{books, opinions};
use crate::shared::application::pagination::{paginate, PaginatedResult, PaginationParams};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::LogContext;
use crate::shared::Database;

pub struct BookRepositoryImpl {
    db: Arc<Database>,
}

impl BookRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookRepository for BookRepositoryImpl {
    async fn find_page(
        &self,
        specification: BookSpecification,
        pagination: PaginationParams,
    ) -> AppResult<PaginatedResult<Book>> {
        self.db
            .run(move |conn| {
                let total = filtered_books(&specification)
                    .count()
                    .get_result::<i64>(conn)?;

                paginate(&pagination, total as u64, |offset, limit| {
                    let models = filtered_books(&specification)
                        .order(books::id.desc())
                        .offset(offset)
                        .limit(limit)
                        .select(BookModel::as_select())
                        .load::<BookModel>(conn)?;
                    Ok(attach_opinions(conn, models)?)
                })
            })
            .await
    }

    async fn find_all_matching(&self, specification: BookSpecification) -> AppResult<Vec<Book>> {
        let needle = specification.title_or_author.clone();

        let found = self
            .db
            .run(move |conn| {
                let models = filtered_books(&specification)
                    .order(books::id.desc())
                    .select(BookModel::as_select())
                    .load::<BookModel>(conn)?;
                Ok(attach_opinions(conn, models)?)
            })
            .await?;

        if let Some(needle) = needle {
            LogContext::search_operation(&needle, Some(found.len()));
        }
        Ok(found)
    }

    async fn find_with_opinions_rated_at_least(&self, threshold: f64) -> AppResult<Vec<Book>> {
        self.db
            .run(move |conn| {
                let rated_book_ids = opinions::table
                    .filter(opinions::rate.ge(threshold))
                    .select(opinions::book_id);

                let models = books::table
                    .filter(books::id.eq_any(rated_book_ids))
                    .order(books::id.asc())
                    .select(BookModel::as_select())
                    .load::<BookModel>(conn)?;
                Ok(attach_opinions(conn, models)?)
            })
            .await
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        self.db
            .run(move |conn| {
                let model = books::table
                    .find(id)
                    .select(BookModel::as_select())
                    .first::<BookModel>(conn)
                    .optional()?;

                match model {
                    Some(m) => Ok(attach_opinions(conn, vec![m])?.into_iter().next()),
                    None => Ok(None),
                }
            })
            .await
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        self.db
            .run(move |conn| {
                let found = diesel::select(diesel::dsl::exists(books::table.find(id)))
                    .get_result::<bool>(conn)?;
                Ok(found)
            })
            .await
    }

    async fn create(&self, draft: BookDraft) -> AppResult<Book> {
        let new_row = NewBookModel::from(draft);

        self.db
            .run(move |conn| {
                let saved = diesel::insert_into(books::table)
                    .values(&new_row)
                    .returning(BookModel::as_returning())
                    .get_result::<BookModel>(conn)?;
                Ok(saved.into_entity(Vec::new()))
            })
            .await
    }

    async fn update(&self, id: i32, draft: BookDraft) -> AppResult<Book> {
        let changes = BookChangeset::from(draft);

        self.db
            .run(move |conn| {
                let updated = diesel::update(books::table.find(id))
                    .set(&changes)
                    .returning(BookModel::as_returning())
                    .get_result::<BookModel>(conn)
                    .optional()?
                    .ok_or_else(|| AppError::NotFound(format!("Book with ID {} not found", id)))?;

                Ok(attach_opinions(conn, vec![updated])?
                    .into_iter()
                    .next()
                    .ok_or_else(|| AppError::InternalError("Failed to reload updated book".into()))?)
            })
            .await
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.db
            .run(move |conn| {
                let n = diesel::delete(books::table.find(id)).execute(conn)?;
                if n == 0 {
                    return Err(AppError::NotFound(format!("Book with ID {} not found", id)));
                }
                LogContext::db_operation("delete", "books", None);
                Ok(())
            })
            .await
    }
}

// -----------------------------------------------------------------------------
// Query helpers
// -----------------------------------------------------------------------------

/// Translate a specification into a boxed diesel query over `books`.
fn filtered_books<'a>(specification: &BookSpecification) -> books::BoxedQuery<'a, Pg> {
    let mut query = books::table.into_boxed();

    if let Some(filter) = &specification.genre {
        query = query
            .filter(books::genre_id.is_not_null())
            .filter(books::genre_id.ne(0));

        if let GenreFilter::Ids(ids) = filter {
            query = query.filter(books::genre_id.eq_any(ids.clone()));
        }
    }

    if let Some(pattern) = specification.search_pattern() {
        query = query.filter(
            books::title
                .ilike(pattern.clone())
                .escape('\\')
                .or(books::author.ilike(pattern).escape('\\')),
        );
    }

    query
}

/// Eager-load opinions for a batch of books, preserving the batch order.
pub(crate) fn attach_opinions(
    conn: &mut PgConnection,
    book_models: Vec<BookModel>,
) -> QueryResult<Vec<Book>> {
    if book_models.is_empty() {
        return Ok(Vec::new());
    }

    let opinion_models = OpinionModel::belonging_to(&book_models)
        .order(opinions::id.asc())
        .select(OpinionModel::as_select())
        .load::<OpinionModel>(conn)?;
    let grouped = opinion_models.grouped_by(&book_models);

    Ok(book_models
        .into_iter()
        .zip(grouped)
        .map(|(book, opinions)| {
            book.into_entity(opinions.into_iter().map(Opinion::from).collect())
        })
        .collect())
}
