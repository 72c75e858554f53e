pub mod entities;
pub mod repository;

pub use entities::{sort_by_name, Genre, GenreChanges, GenreDraft};
pub use repository::GenreRepository;
