pub mod prompt;

pub use prompt::{StoryGenerator, StoryPrompt, STORYTELLER_PERSONA};
