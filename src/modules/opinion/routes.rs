use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use super::domain::{NewOpinion, Opinion, OpinionChanges, OpinionWrite};
use crate::app::AppState;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::extract::{ApiJson, ApiPath, ApiQuery};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOpinionRequest {
    #[serde(default)]
    pub book_id: i32,
    /// Missing ratings count as 0 and fail validation
    #[serde(default)]
    pub rate: f64,
    #[serde(default)]
    pub view: String,
    #[serde(default)]
    pub user_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOpinionRequest {
    pub rate: Option<f64>,
    #[serde(default)]
    pub view: String,
    #[serde(default)]
    pub user_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageRateQuery {
    pub book_id: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageRateResponse {
    pub book_id: i32,
    pub average_rate: f64,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/opinions", get(list_opinions).post(create_opinion))
        .route("/api/opinions/averageRate", get(average_rate))
        .route("/api/opinions/book/{book_id}", get(opinions_for_book))
        .route("/api/opinions/{id}", get(get_opinion).put(update_opinion))
}

async fn list_opinions(State(state): State<AppState>) -> AppResult<Json<Vec<Opinion>>> {
    Ok(Json(state.opinions.get_all().await?))
}

async fn get_opinion(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<Opinion>> {
    Ok(Json(state.opinions.get_by_id(id).await?))
}

async fn opinions_for_book(
    State(state): State<AppState>,
    ApiPath(book_id): ApiPath<i32>,
) -> AppResult<Json<Vec<Opinion>>> {
    Ok(Json(state.opinions.get_by_book(book_id).await?))
}

async fn create_opinion(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateOpinionRequest>,
) -> AppResult<(StatusCode, Json<OpinionWrite>)> {
    let opinion = NewOpinion::new(request.book_id, request.rate, request.view, request.user_name);
    let write = state.opinions.create(opinion).await?;
    Ok((StatusCode::CREATED, Json(write)))
}

async fn update_opinion(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(request): ApiJson<UpdateOpinionRequest>,
) -> AppResult<Json<OpinionWrite>> {
    let changes = OpinionChanges::new(request.rate, request.view, request.user_name);
    Ok(Json(state.opinions.update(id, changes).await?))
}

async fn average_rate(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AverageRateQuery>,
) -> AppResult<Json<AverageRateResponse>> {
    let average_rate = state.opinions.average_rate(query.book_id).await?;
    if average_rate == 0.0 {
        return Err(AppError::NotFound(format!(
            "No opinions found for book {}",
            query.book_id
        )));
    }

    Ok(Json(AverageRateResponse {
        book_id: query.book_id,
        average_rate,
    }))
}
