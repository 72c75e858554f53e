pub mod service;

pub use service::StoryService;
