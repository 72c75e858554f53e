use std::sync::Arc;

use crate::log_info;
use crate::modules::genre::domain::{
    sort_by_name, Genre, GenreChanges, GenreDraft, GenreRepository,
};
use crate::shared::errors::{AppError, AppResult};

pub struct GenreService {
    genre_repo: Arc<dyn GenreRepository>,
}

impl GenreService {
    pub fn new(genre_repo: Arc<dyn GenreRepository>) -> Self {
        Self { genre_repo }
    }

    /// All genres ordered by name
    pub async fn list_genres(&self, include_books: bool) -> AppResult<Vec<Genre>> {
        let mut genres = self.genre_repo.find_all(include_books).await?;
        sort_by_name(&mut genres);
        Ok(genres)
    }

    pub async fn get_genre(&self, id: i32, include_books: bool) -> AppResult<Genre> {
        self.genre_repo
            .find_by_id(id, include_books)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Genre with ID {} not found", id)))
    }

    pub async fn story_generation_genres(&self) -> AppResult<Vec<Genre>> {
        let mut genres = self.genre_repo.find_for_story_generation().await?;
        sort_by_name(&mut genres);
        Ok(genres)
    }

    pub async fn create_genre(&self, draft: GenreDraft) -> AppResult<Genre> {
        draft.validate()?;

        let genre = self.genre_repo.create(draft).await?;
        log_info!("Created genre {} '{}'", genre.id, genre.name);
        Ok(genre)
    }

    /// Rename and optionally re-flag; an absent flag keeps the stored one
    pub async fn update_genre(&self, id: i32, changes: GenreChanges) -> AppResult<Genre> {
        changes.validate()?;
        self.genre_repo.update(id, changes).await
    }

    pub async fn delete_genre(&self, id: i32) -> AppResult<()> {
        self.genre_repo.delete(id).await?;
        log_info!("Deleted genre {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::genre::domain::repository::MockGenreRepository;
    use mockall::predicate::eq;

    fn genre(id: i32, name: &str) -> Genre {
        Genre {
            id,
            name: name.to_string(),
            is_for_story_generation: true,
            books: None,
        }
    }

    #[tokio::test]
    async fn listing_is_sorted_by_name() {
        let mut repo = MockGenreRepository::new();
        repo.expect_find_all()
            .with(eq(false))
            .returning(|_| Ok(vec![genre(1, "Thriller"), genre(2, "Adventure"), genre(3, "comedy")]));

        let genres = GenreService::new(Arc::new(repo))
            .list_genres(false)
            .await
            .unwrap();
        let ids: Vec<_> = genres.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[tokio::test]
    async fn missing_genre_is_not_found() {
        let mut repo = MockGenreRepository::new();
        repo.expect_find_by_id()
            .with(eq(5), eq(true))
            .returning(|_, _| Ok(None));

        let err = GenreService::new(Arc::new(repo))
            .get_genre(5, true)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn blank_name_is_not_persisted() {
        let err = GenreService::new(Arc::new(MockGenreRepository::new()))
            .create_genre(GenreDraft::new(" ".into(), None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn create_passes_normalized_draft() {
        let mut repo = MockGenreRepository::new();
        repo.expect_create()
            .with(eq(GenreDraft {
                name: "Mystery".into(),
                is_for_story_generation: true,
            }))
            .times(1)
            .returning(|draft| Ok(genre(7, &draft.name)));

        let created = GenreService::new(Arc::new(repo))
            .create_genre(GenreDraft::new(" Mystery ".into(), None))
            .await
            .unwrap();
        assert_eq!(created.id, 7);
    }

    #[tokio::test]
    async fn update_without_flag_passes_none_through() {
        let mut repo = MockGenreRepository::new();
        repo.expect_update()
            .with(
                eq(4),
                eq(GenreChanges {
                    name: "Noir".into(),
                    is_for_story_generation: None,
                }),
            )
            .times(1)
            .returning(|id, changes| {
                Ok(Genre {
                    id,
                    name: changes.name,
                    is_for_story_generation: false,
                    books: None,
                })
            });

        let updated = GenreService::new(Arc::new(repo))
            .update_genre(4, GenreChanges::new(" Noir ".into(), None))
            .await
            .unwrap();
        assert!(!updated.is_for_story_generation);
    }
}
