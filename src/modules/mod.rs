// Bounded contexts, one per entity
pub mod book;
pub mod genre;
pub mod opinion;
pub mod story;
