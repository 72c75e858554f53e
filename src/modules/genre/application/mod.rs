pub mod service;

pub use service::GenreService;
