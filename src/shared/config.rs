/// Runtime configuration read from the environment (and `.env` via dotenvy)
use std::net::SocketAddr;

use crate::log_info;
use crate::shared::application::DEFAULT_MAX_PAGE_SIZE;
use crate::shared::errors::{AppError, AppResult};

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind: String,
    pub port: u16,
    pub max_page_size: u32,
    pub cors_origins: Vec<String>,
    pub ai: AiConfig,
}

#[derive(Clone)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

// Keep the key out of logs
impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or_else(|| {
            AppError::ConfigurationError("DATABASE_URL environment variable not found".to_string())
        })?;
        Self::validate_database_url(&database_url)?;

        let port = match lookup("BOOKSHELF_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                AppError::ConfigurationError(format!("Invalid BOOKSHELF_PORT: {}", raw))
            })?,
            None => 8080,
        };

        let max_page_size = match lookup("BOOKSHELF_MAX_PAGE_SIZE") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(AppError::ConfigurationError(format!(
                        "Invalid BOOKSHELF_MAX_PAGE_SIZE: {}",
                        raw
                    )))
                }
            },
            None => DEFAULT_MAX_PAGE_SIZE,
        };

        let cors_origins = lookup("BOOKSHELF_CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let ai = AiConfig {
            api_key: lookup("OPENAI_API_KEY").filter(|key| !key.trim().is_empty()),
            base_url: lookup("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            model: lookup("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
        };

        Ok(Self {
            database_url,
            bind: lookup("BOOKSHELF_BIND").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            max_page_size,
            cors_origins,
            ai,
        })
    }

    fn validate_database_url(database_url: &str) -> AppResult<()> {
        if !database_url.starts_with("postgres://") && !database_url.starts_with("postgresql://") {
            return Err(AppError::ConfigurationError(
                "Invalid database URL format. Must start with postgres:// or postgresql://"
                    .to_string(),
            ));
        }

        // Log connection target without exposing credentials
        log_info!(
            "Using database at: {}",
            database_url.split('@').last().unwrap_or("unknown_host")
        );

        Ok(())
    }

    pub fn socket_addr(&self) -> AppResult<SocketAddr> {
        format!("{}:{}", self.bind, self.port)
            .parse()
            .map_err(|e| AppError::ConfigurationError(format!("Invalid bind address: {}", e)))
    }
}
