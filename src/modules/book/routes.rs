use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use super::domain::{Book, BookDraft};
use crate::app::AppState;
use crate::shared::application::pagination::{PaginatedResult, PaginationParams};
use crate::shared::errors::AppResult;
use crate::shared::extract::{ApiJson, ApiPath, ApiQuery};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl PageQuery {
    fn into_params(self, max_page_size: u32) -> AppResult<PaginationParams> {
        PaginationParams::validated(
            self.page.unwrap_or(1),
            self.page_size.unwrap_or(i64::from(max_page_size)),
            max_page_size,
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreBooksQuery {
    #[serde(default)]
    pub genres_id: String,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleOrAuthorQuery {
    #[serde(default)]
    pub title_or_author: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopBooksQuery {
    pub number_of_books: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub genre_id: Option<i32>,
}

impl From<BookRequest> for BookDraft {
    fn from(request: BookRequest) -> Self {
        BookDraft::new(
            request.title,
            request.author,
            request.description,
            request.image_url,
            request.genre_id,
        )
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/books", get(list_books).post(create_book))
        .route("/api/books/TopBooks", get(top_books))
        .route("/api/books/TitleOrAuthor", get(search_books))
        .route("/api/books/genre", get(books_by_genre))
        .route(
            "/api/books/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
}

async fn list_books(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> AppResult<Json<PaginatedResult<Book>>> {
    let params = query.into_params(state.max_page_size)?;
    Ok(Json(state.books.list_books(params).await?))
}

async fn books_by_genre(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<GenreBooksQuery>,
) -> AppResult<Json<PaginatedResult<Book>>> {
    let params = PageQuery {
        page: query.page,
        page_size: query.page_size,
    }
    .into_params(state.max_page_size)?;
    Ok(Json(
        state
            .books
            .list_books_by_genres(&query.genres_id, params)
            .await?,
    ))
}

async fn search_books(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<TitleOrAuthorQuery>,
) -> AppResult<Json<Vec<Book>>> {
    Ok(Json(
        state
            .books
            .search_by_title_or_author(&query.title_or_author)
            .await?,
    ))
}

async fn top_books(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<TopBooksQuery>,
) -> AppResult<Json<Vec<Book>>> {
    Ok(Json(state.books.top_books(query.number_of_books).await?))
}

async fn get_book(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<Book>> {
    Ok(Json(state.books.get_book(id).await?))
}

async fn create_book(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<BookRequest>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state.books.create_book(request.into()).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

async fn update_book(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(request): ApiJson<BookRequest>,
) -> AppResult<Json<Book>> {
    Ok(Json(state.books.update_book(id, request.into()).await?))
}

async fn delete_book(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<StatusCode> {
    state.books.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
