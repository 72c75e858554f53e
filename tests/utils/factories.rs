/// Test data builders with sensible defaults
use bookshelf::modules::book::domain::BookDraft;
use bookshelf::modules::genre::domain::GenreDraft;
use bookshelf::modules::opinion::domain::NewOpinion;

pub struct BookFactory {
    title: String,
    author: String,
    description: Option<String>,
    genre_id: Option<i32>,
}

impl Default for BookFactory {
    fn default() -> Self {
        Self {
            title: "Test Book".to_string(),
            author: "Test Author".to_string(),
            description: Some("A book used in tests".to_string()),
            genre_id: None,
        }
    }
}

impl BookFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn author(mut self, author: &str) -> Self {
        self.author = author.to_string();
        self
    }

    pub fn genre(mut self, genre_id: i32) -> Self {
        self.genre_id = Some(genre_id);
        self
    }

    pub fn build(self) -> BookDraft {
        BookDraft::new(self.title, self.author, self.description, None, self.genre_id)
    }
}

pub fn genre(name: &str) -> GenreDraft {
    GenreDraft::new(name.to_string(), None)
}

pub fn opinion(book_id: i32, rate: f64) -> NewOpinion {
    NewOpinion::new(book_id, rate, "Worth reading".to_string(), "tester".to_string())
}
