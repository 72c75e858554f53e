use std::sync::Arc;

use crate::log_info;
use crate::modules::story::domain::{StoryGenerator, StoryPrompt};
use crate::shared::errors::AppResult;
use crate::shared::utils::TimedOperation;

pub struct StoryService {
    generator: Arc<dyn StoryGenerator>,
}

impl StoryService {
    pub fn new(generator: Arc<dyn StoryGenerator>) -> Self {
        Self { generator }
    }

    pub async fn generate_story(&self, prompt: StoryPrompt) -> AppResult<String> {
        prompt.validate()?;

        let timer = TimedOperation::new("story_generation");
        let story = self.generator.generate(&prompt).await?;
        timer.finish_with_info(&prompt.genre);

        log_info!(
            "Generated story in {} ({} chars)",
            prompt.language,
            story.chars().count()
        );
        Ok(story)
    }
}
