pub mod entities;
pub mod rating;
pub mod repository;

pub use entities::{NewOpinion, Opinion, OpinionChanges, OpinionWrite};
pub use rating::average_rate;
pub use repository::OpinionRepository;
