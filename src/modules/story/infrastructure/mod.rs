pub mod openai;

pub use openai::OpenAiStoryGenerator;
