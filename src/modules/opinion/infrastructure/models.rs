use crate::modules::book::infrastructure::models::BookModel;
use crate::modules::opinion::domain::{NewOpinion, Opinion, OpinionChanges};
use crate::schema::opinions;
use diesel::prelude::*;

// For reading from database - with associations support
#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone)]
#[diesel(belongs_to(BookModel, foreign_key = book_id))]
#[diesel(table_name = opinions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OpinionModel {
    pub id: i32,
    pub rate: Option<f64>,
    pub view: String,
    pub user_name: String,
    pub post_date: String,
    pub book_id: i32,
}

// For inserting new opinions
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = opinions)]
pub struct NewOpinionModel {
    pub rate: Option<f64>,
    pub view: String,
    pub user_name: String,
    pub post_date: String,
    pub book_id: i32,
}

// For updating existing opinions; a `None` rate leaves the column untouched
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = opinions)]
pub struct OpinionChangeset {
    pub rate: Option<f64>,
    pub view: String,
    pub user_name: String,
}

impl From<OpinionModel> for Opinion {
    fn from(model: OpinionModel) -> Self {
        Self {
            id: model.id,
            rate: model.rate,
            view: model.view,
            user_name: model.user_name,
            post_date: model.post_date,
            book_id: model.book_id,
        }
    }
}

impl From<NewOpinion> for NewOpinionModel {
    fn from(opinion: NewOpinion) -> Self {
        Self {
            rate: Some(opinion.rate),
            view: opinion.view,
            user_name: opinion.user_name,
            post_date: opinion.post_date,
            book_id: opinion.book_id,
        }
    }
}

impl From<OpinionChanges> for OpinionChangeset {
    fn from(changes: OpinionChanges) -> Self {
        Self {
            rate: changes.rate,
            view: changes.view,
            user_name: changes.user_name,
        }
    }
}
