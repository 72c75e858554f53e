// Shared Kernel
// Cross-cutting pieces reused by every bounded context

pub mod application; // Shared application layer patterns (pagination)
pub mod config; // Environment-driven configuration
pub mod errors; // Shared error types
pub mod extract; // Request extractors mapped onto AppError
pub mod infrastructure; // Shared infrastructure (database)
pub mod utils; // Logging and validation helpers

// Re-exports for convenience
pub use config::AppConfig;
pub use infrastructure::database::Database;
