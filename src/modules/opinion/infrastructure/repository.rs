use std::sync::Arc;

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

use super::models::{NewOpinionModel, OpinionChangeset, OpinionModel};
use crate::log_debug;
use crate::modules::opinion::domain::{
    average_rate, NewOpinion, Opinion, OpinionChanges, OpinionRepository, OpinionWrite,
};
use crate::schema::{books, opinions};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::TimedOperation;
use crate::shared::Database;

pub struct OpinionRepositoryImpl {
    db: Arc<Database>,
}

impl OpinionRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OpinionRepository for OpinionRepositoryImpl {
    async fn find_all(&self) -> AppResult<Vec<Opinion>> {
        self.db
            .run(|conn| {
                let rows = opinions::table
                    .order(opinions::id.asc())
                    .select(OpinionModel::as_select())
                    .load::<OpinionModel>(conn)?;
                Ok(rows.into_iter().map(Opinion::from).collect())
            })
            .await
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Opinion>> {
        self.db
            .run(move |conn| {
                let row = opinions::table
                    .find(id)
                    .select(OpinionModel::as_select())
                    .first::<OpinionModel>(conn)
                    .optional()?;
                Ok(row.map(Opinion::from))
            })
            .await
    }

    async fn find_by_book(&self, book_id: i32) -> AppResult<Vec<Opinion>> {
        self.db
            .run(move |conn| {
                let rows = opinions::table
                    .filter(opinions::book_id.eq(book_id))
                    .order(opinions::id.asc())
                    .select(OpinionModel::as_select())
                    .load::<OpinionModel>(conn)?;
                Ok(rows.into_iter().map(Opinion::from).collect())
            })
            .await
    }

    async fn create(&self, opinion: NewOpinion) -> AppResult<OpinionWrite> {
        let new_row = NewOpinionModel::from(opinion);

        self.db
            .run(move |conn| {
                let timer = TimedOperation::new("opinion_create");
                let write = conn.transaction::<_, AppError, _>(|conn| {
                    let inserted = diesel::insert_into(opinions::table)
                        .values(&new_row)
                        .returning(OpinionModel::as_returning())
                        .get_result::<OpinionModel>(conn)?;

                    let average_rate = recompute_average(conn, inserted.book_id)?;
                    Ok(OpinionWrite {
                        opinion: inserted.into(),
                        average_rate,
                    })
                })?;
                timer.finish();
                Ok(write)
            })
            .await
    }

    async fn update(&self, id: i32, changes: OpinionChanges) -> AppResult<OpinionWrite> {
        let changeset = OpinionChangeset::from(changes);

        self.db
            .run(move |conn| {
                conn.transaction::<_, AppError, _>(|conn| {
                    let updated = diesel::update(opinions::table.find(id))
                        .set(&changeset)
                        .returning(OpinionModel::as_returning())
                        .get_result::<OpinionModel>(conn)
                        .optional()?
                        .ok_or_else(|| {
                            AppError::NotFound(format!("Opinion with ID {} not found", id))
                        })?;

                    let average_rate = recompute_average(conn, updated.book_id)?;
                    Ok(OpinionWrite {
                        opinion: updated.into(),
                        average_rate,
                    })
                })
            })
            .await
    }

    async fn refresh_average(&self, book_id: i32) -> AppResult<Option<f64>> {
        self.db
            .run(move |conn| {
                conn.transaction::<_, AppError, _>(|conn| {
                    let exists = books::table
                        .find(book_id)
                        .select(books::id)
                        .first::<i32>(conn)
                        .optional()?
                        .is_some();
                    if !exists {
                        return Ok(None);
                    }

                    Ok(Some(recompute_average(conn, book_id)?))
                })
            })
            .await
    }
}

/// Recalculate a book's average from its opinions and store it on the book row.
fn recompute_average(conn: &mut PgConnection, book_id: i32) -> QueryResult<f64> {
    let rates: Vec<Option<f64>> = opinions::table
        .filter(opinions::book_id.eq(book_id))
        .select(opinions::rate)
        .load(conn)?;

    let average = average_rate(&rates);

    diesel::update(books::table.find(book_id))
        .set(books::average_rate.eq(Some(average)))
        .execute(conn)?;

    log_debug!(
        "Book {} average rate set to {} from {} opinions",
        book_id,
        average,
        rates.len()
    );
    Ok(average)
}
