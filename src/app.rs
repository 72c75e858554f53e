use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderValue;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::log_info;
use crate::modules::book::application::BookService;
use crate::modules::book::domain::BookRepository;
use crate::modules::book::infrastructure::BookRepositoryImpl;
use crate::modules::genre::application::GenreService;
use crate::modules::genre::infrastructure::GenreRepositoryImpl;
use crate::modules::opinion::application::OpinionService;
use crate::modules::opinion::infrastructure::OpinionRepositoryImpl;
use crate::modules::story::application::StoryService;
use crate::modules::story::infrastructure::OpenAiStoryGenerator;
use crate::modules::{book, genre, opinion, story};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::PoolStatus;
use crate::shared::{AppConfig, Database};

/// Services shared by every request handler
#[derive(Clone)]
pub struct AppState {
    pub books: Arc<BookService>,
    pub genres: Arc<GenreService>,
    pub opinions: Arc<OpinionService>,
    pub stories: Arc<StoryService>,
    pub database: Option<Arc<Database>>,
    pub max_page_size: u32,
}

impl AppState {
    /// Wire repositories and services over a live database
    pub fn new(config: &AppConfig, database: Arc<Database>) -> AppResult<Self> {
        let book_repo: Arc<dyn BookRepository> =
            Arc::new(BookRepositoryImpl::new(Arc::clone(&database)));
        let genre_repo = Arc::new(GenreRepositoryImpl::new(Arc::clone(&database)));
        let opinion_repo = Arc::new(OpinionRepositoryImpl::new(Arc::clone(&database)));
        let generator = Arc::new(OpenAiStoryGenerator::new(config.ai.clone())?);

        if config.ai.api_key.is_none() {
            crate::log_warn!("OPENAI_API_KEY not set, story generation will fail");
        }

        Ok(Self {
            books: Arc::new(BookService::new(Arc::clone(&book_repo))),
            genres: Arc::new(GenreService::new(genre_repo)),
            opinions: Arc::new(OpinionService::new(opinion_repo, book_repo)),
            stories: Arc::new(StoryService::new(generator)),
            database: Some(database),
            max_page_size: config.max_page_size,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    database: Option<PoolStatus>,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        database: state.database.as_ref().map(|db| db.pool_status()),
    })
}

/// Assemble every module's routes behind a CORS layer.
///
/// An empty origin list allows any origin.
pub fn build_router(state: AppState, cors_origins: &[String]) -> AppResult<Router> {
    let cors = if cors_origins.is_empty() {
        CorsLayer::permissive()
    } else {
        let origins = cors_origins
            .iter()
            .map(|origin| {
                origin.parse::<HeaderValue>().map_err(|_| {
                    AppError::ConfigurationError(format!("Invalid CORS origin: {}", origin))
                })
            })
            .collect::<AppResult<Vec<_>>>()?;
        log_info!("CORS restricted to {} origin(s)", origins.len());

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Ok(Router::new()
        .route("/health", get(health))
        .merge(book::routes())
        .merge(genre::routes())
        .merge(opinion::routes())
        .merge(story::routes())
        .layer(cors)
        .with_state(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::book::domain::repository::MockBookRepository;
    use crate::modules::genre::domain::repository::MockGenreRepository;
    use crate::modules::opinion::domain::repository::MockOpinionRepository;
    use crate::modules::story::domain::prompt::MockStoryGenerator;
    use crate::shared::application::pagination::PaginatedResult;
    use serde_json::{json, Value};

    struct Mocks {
        books: MockBookRepository,
        genres: MockGenreRepository,
        opinions: MockOpinionRepository,
        stories: MockStoryGenerator,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                books: MockBookRepository::new(),
                genres: MockGenreRepository::new(),
                opinions: MockOpinionRepository::new(),
                stories: MockStoryGenerator::new(),
            }
        }

        fn into_state(self) -> AppState {
            let books: Arc<dyn BookRepository> = Arc::new(self.books);
            AppState {
                books: Arc::new(BookService::new(Arc::clone(&books))),
                genres: Arc::new(GenreService::new(Arc::new(self.genres))),
                opinions: Arc::new(OpinionService::new(Arc::new(self.opinions), books)),
                stories: Arc::new(StoryService::new(Arc::new(self.stories))),
                database: None,
                max_page_size: 6,
            }
        }
    }

    /// Serve the router on an ephemeral port and return its base URL
    async fn spawn_app(mocks: Mocks) -> String {
        let router = build_router(mocks.into_state(), &[]).unwrap();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let base = spawn_app(Mocks::new()).await;
        let body: Value = reqwest::get(format!("{base}/health"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "ok");
        assert!(body["database"].is_null());
    }

    #[tokio::test]
    async fn malformed_genre_list_is_bad_request() {
        let base = spawn_app(Mocks::new()).await;
        let response = reqwest::get(format!("{base}/api/books/genre?genresId=1,x"))
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["type"], "ValidationError");
        assert_eq!(body["message"], "Genre list contains invalid entries");
    }

    #[tokio::test]
    async fn oversized_page_is_bad_request() {
        let base = spawn_app(Mocks::new()).await;
        let response = reqwest::get(format!("{base}/api/books?page=1&pageSize=50"))
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn empty_genre_filter_returns_typed_empty_page() {
        let mut mocks = Mocks::new();
        mocks
            .books
            .expect_find_page()
            .returning(|_, params| Ok(PaginatedResult::empty(&params)));

        let base = spawn_app(mocks).await;
        let body: Value = reqwest::get(format!("{base}/api/books/genre?genresId=All&page=2"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["page"], 0);
        assert_eq!(body["totalPages"], 0);
        assert_eq!(body["items"], json!([]));
    }

    #[tokio::test]
    async fn blank_search_is_bad_request() {
        let base = spawn_app(Mocks::new()).await;
        let response = reqwest::get(format!("{base}/api/books/TitleOrAuthor?titleOrAuthor=%20"))
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_book_is_not_found() {
        let mut mocks = Mocks::new();
        mocks.books.expect_find_by_id().returning(|_| Ok(None));

        let base = spawn_app(mocks).await;
        let response = reqwest::get(format!("{base}/api/books/77")).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn zero_rating_is_rejected() {
        let base = spawn_app(Mocks::new()).await;
        let response = reqwest::Client::new()
            .post(format!("{base}/api/opinions"))
            .json(&json!({ "bookId": 1, "rate": 0, "view": "meh", "userName": "reader" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn zero_average_is_reported_as_not_found() {
        let mut mocks = Mocks::new();
        mocks
            .opinions
            .expect_refresh_average()
            .returning(|_| Ok(Some(0.0)));

        let base = spawn_app(mocks).await;
        let response = reqwest::get(format!("{base}/api/opinions/averageRate?bookId=3"))
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], "No opinions found for book 3");
    }

    #[tokio::test]
    async fn story_endpoint_wraps_generated_text() {
        let mut mocks = Mocks::new();
        mocks
            .stories
            .expect_generate()
            .returning(|_| Ok("A short tale.".to_string()));

        let base = spawn_app(mocks).await;
        let body: Value = reqwest::Client::new()
            .post(format!("{base}/api/story/AI"))
            .json(&json!({ "language": "English", "readingTimeMinutes": 3, "genre": "fable" }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["story"], "A short tale.");
    }

    #[tokio::test]
    async fn story_failure_is_bad_gateway() {
        let mut mocks = Mocks::new();
        mocks
            .stories
            .expect_generate()
            .returning(|_| Err(AppError::ExternalServiceError("upstream down".into())));

        let base = spawn_app(mocks).await;
        let response = reqwest::Client::new()
            .post(format!("{base}/api/story/AI"))
            .json(&json!({ "language": "English", "readingTimeMinutes": 3, "genre": "fable" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn mistyped_body_is_a_validation_error() {
        let base = spawn_app(Mocks::new()).await;
        let response = reqwest::Client::new()
            .post(format!("{base}/api/opinions"))
            .json(&json!({ "bookId": "abc", "rate": 4, "view": "ok", "userName": "reader" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["type"], "ValidationError");
        assert!(body["message"].as_str().unwrap().contains("bookId"));
    }

    #[tokio::test]
    async fn non_numeric_page_is_a_validation_error() {
        let base = spawn_app(Mocks::new()).await;
        let response = reqwest::get(format!("{base}/api/books?page=abc"))
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["type"], "ValidationError");
    }

    #[tokio::test]
    async fn missing_number_of_books_is_a_validation_error() {
        let base = spawn_app(Mocks::new()).await;
        let response = reqwest::get(format!("{base}/api/books/TopBooks"))
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["type"], "ValidationError");
        assert!(body["message"].as_str().unwrap().contains("numberOfBooks"));
    }

    #[tokio::test]
    async fn non_numeric_id_is_a_validation_error() {
        let base = spawn_app(Mocks::new()).await;
        let response = reqwest::get(format!("{base}/api/genres/drama"))
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["type"], "ValidationError");
    }

    #[test]
    fn rejects_invalid_cors_origin() {
        let result = build_router(Mocks::new().into_state(), &["bad\norigin".to_string()]);
        assert!(matches!(result, Err(AppError::ConfigurationError(_))));
    }
}
