pub mod service;

pub use service::BookService;
