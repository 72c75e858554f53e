pub mod entities;
pub mod popularity;
pub mod repository;
pub mod specification;

pub use entities::{Book, BookDraft};
pub use popularity::{rank_most_popular, GOOD_OPINION_THRESHOLD};
pub use repository::BookRepository;
pub use specification::{BookSpecification, GenreFilter};
