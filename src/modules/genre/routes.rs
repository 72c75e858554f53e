use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use super::domain::{Genre, GenreChanges, GenreDraft};
use crate::app::AppState;
use crate::shared::errors::AppResult;
use crate::shared::extract::{ApiJson, ApiPath, ApiQuery};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncludeBooksQuery {
    #[serde(default)]
    pub include_books: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreRequest {
    #[serde(default)]
    pub name: String,
    pub is_for_story_generation: Option<bool>,
}

impl From<GenreRequest> for GenreDraft {
    fn from(request: GenreRequest) -> Self {
        GenreDraft::new(request.name, request.is_for_story_generation)
    }
}

impl From<GenreRequest> for GenreChanges {
    fn from(request: GenreRequest) -> Self {
        GenreChanges::new(request.name, request.is_for_story_generation)
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/genres", get(list_genres).post(create_genre))
        .route("/api/genres/storyGeneration", get(story_generation_genres))
        .route(
            "/api/genres/{id}",
            get(get_genre).put(update_genre).delete(delete_genre),
        )
}

async fn list_genres(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<IncludeBooksQuery>,
) -> AppResult<Json<Vec<Genre>>> {
    Ok(Json(state.genres.list_genres(query.include_books).await?))
}

async fn story_generation_genres(State(state): State<AppState>) -> AppResult<Json<Vec<Genre>>> {
    Ok(Json(state.genres.story_generation_genres().await?))
}

async fn get_genre(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiQuery(query): ApiQuery<IncludeBooksQuery>,
) -> AppResult<Json<Genre>> {
    Ok(Json(state.genres.get_genre(id, query.include_books).await?))
}

async fn create_genre(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<GenreRequest>,
) -> AppResult<(StatusCode, Json<Genre>)> {
    let genre = state.genres.create_genre(request.into()).await?;
    Ok((StatusCode::CREATED, Json(genre)))
}

async fn update_genre(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(request): ApiJson<GenreRequest>,
) -> AppResult<Json<Genre>> {
    Ok(Json(state.genres.update_genre(id, request.into()).await?))
}

async fn delete_genre(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<StatusCode> {
    state.genres.delete_genre(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
