pub mod app;
pub mod modules;
pub mod schema;
pub mod shared;

pub use app::{build_router, AppState};
