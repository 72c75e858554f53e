use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use super::domain::StoryPrompt;
use crate::app::AppState;
use crate::shared::errors::AppResult;
use crate::shared::extract::ApiJson;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryRequest {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub reading_time_minutes: u32,
    #[serde(default)]
    pub genre: String,
}

#[derive(Debug, Serialize)]
pub struct StoryResponse {
    pub story: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/story/AI", post(generate_story))
}

async fn generate_story(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<StoryRequest>,
) -> AppResult<Json<StoryResponse>> {
    let prompt = StoryPrompt::new(request.language, request.reading_time_minutes, request.genre);
    let story = state.stories.generate_story(prompt).await?;
    Ok(Json(StoryResponse { story }))
}
