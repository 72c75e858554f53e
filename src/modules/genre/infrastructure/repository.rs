use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

use super::models::{GenreChangeset, GenreModel, NewGenreModel};
use crate::modules::book::domain::Book;
use crate::modules::book::infrastructure::models::BookModel;
use crate::modules::book::infrastructure::repository::attach_opinions;
use crate::modules::genre::domain::{Genre, GenreChanges, GenreDraft, GenreRepository};
use crate::schema::{books, genres};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::LogContext;
use crate::shared::Database;

pub struct GenreRepositoryImpl {
    db: Arc<Database>,
}

impl GenreRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GenreRepository for GenreRepositoryImpl {
    async fn find_all(&self, include_books: bool) -> AppResult<Vec<Genre>> {
        self.db
            .run(move |conn| {
                let models = genres::table
                    .order(genres::id.asc())
                    .select(GenreModel::as_select())
                    .load::<GenreModel>(conn)?;
                Ok(into_genres(conn, models, include_books)?)
            })
            .await
    }

    async fn find_by_id(&self, id: i32, include_books: bool) -> AppResult<Option<Genre>> {
        self.db
            .run(move |conn| {
                let model = genres::table
                    .find(id)
                    .select(GenreModel::as_select())
                    .first::<GenreModel>(conn)
                    .optional()?;

                match model {
                    Some(m) => Ok(into_genres(conn, vec![m], include_books)?.into_iter().next()),
                    None => Ok(None),
                }
            })
            .await
    }

    async fn find_for_story_generation(&self) -> AppResult<Vec<Genre>> {
        self.db
            .run(|conn| {
                let models = genres::table
                    .filter(genres::is_for_story_generation.eq(true))
                    .order(genres::id.asc())
                    .select(GenreModel::as_select())
                    .load::<GenreModel>(conn)?;
                Ok(models.into_iter().map(|m| m.into_entity(None)).collect())
            })
            .await
    }

    async fn create(&self, draft: GenreDraft) -> AppResult<Genre> {
        let row = NewGenreModel::from(draft);

        self.db
            .run(move |conn| {
                let saved = diesel::insert_into(genres::table)
                    .values(&row)
                    .returning(GenreModel::as_returning())
                    .get_result::<GenreModel>(conn)?;
                Ok(saved.into_entity(None))
            })
            .await
    }

    async fn update(&self, id: i32, changes: GenreChanges) -> AppResult<Genre> {
        let changeset = GenreChangeset::from(changes);

        self.db
            .run(move |conn| {
                let updated = diesel::update(genres::table.find(id))
                    .set(&changeset)
                    .returning(GenreModel::as_returning())
                    .get_result::<GenreModel>(conn)
                    .optional()?
                    .ok_or_else(|| AppError::NotFound(format!("Genre with ID {} not found", id)))?;
                Ok(updated.into_entity(None))
            })
            .await
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.db
            .run(move |conn| {
                let n = diesel::delete(genres::table.find(id)).execute(conn)?;
                if n == 0 {
                    return Err(AppError::NotFound(format!("Genre with ID {} not found", id)));
                }
                LogContext::db_operation("delete", "genres", None);
                Ok(())
            })
            .await
    }
}

/// Convert rows to entities, eager-loading books (and their opinions) when asked.
fn into_genres(
    conn: &mut PgConnection,
    models: Vec<GenreModel>,
    include_books: bool,
) -> QueryResult<Vec<Genre>> {
    if !include_books || models.is_empty() {
        return Ok(models.into_iter().map(|m| m.into_entity(None)).collect());
    }

    let genre_ids: Vec<i32> = models.iter().map(|m| m.id).collect();
    let book_models = books::table
        .filter(books::genre_id.eq_any(genre_ids))
        .order(books::id.asc())
        .select(BookModel::as_select())
        .load::<BookModel>(conn)?;

    let mut by_genre: HashMap<i32, Vec<Book>> = HashMap::new();
    for book in attach_opinions(conn, book_models)? {
        if let Some(genre_id) = book.genre_id {
            by_genre.entry(genre_id).or_default().push(book);
        }
    }

    Ok(models
        .into_iter()
        .map(|m| {
            let books = by_genre.remove(&m.id).unwrap_or_default();
            m.into_entity(Some(books))
        })
        .collect())
}
