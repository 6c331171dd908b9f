//! Genre workflows

use uuid::Uuid;

use super::{Deletion, Submission};
use crate::{
    error::{AppError, AppResult},
    models::{Book, Genre, GenreForm},
    repository::{Inserted, Repository},
};

#[derive(Clone)]
pub struct GenresService {
    repository: Repository,
}

impl GenresService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.repository.list_genres().await
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<(Genre, Vec<Book>)> {
        let (genre, books) = tokio::try_join!(
            self.repository.get_genre(id),
            self.repository.books_by_genre(id),
        )?;
        let genre = genre.ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;
        Ok((genre, books))
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Option<Genre>> {
        self.repository.get_genre(id).await
    }

    pub async fn delete_preview(&self, id: Uuid) -> AppResult<Option<(Genre, Vec<Book>)>> {
        let (genre, books) = tokio::try_join!(
            self.repository.get_genre(id),
            self.repository.books_by_genre(id),
        )?;
        Ok(genre.map(|genre| (genre, books)))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<Deletion<Genre>> {
        let (genre, books) = tokio::try_join!(
            self.repository.get_genre(id),
            self.repository.books_by_genre(id),
        )?;

        if !books.is_empty() {
            tracing::info!("Genre {} has {} book(s), refusing delete", id, books.len());
            return Ok(Deletion::Blocked {
                record: genre,
                books,
            });
        }

        self.repository.delete_genre(id).await?;
        tracing::info!("Deleted genre {}", id);
        Ok(Deletion::Deleted)
    }

    /// Create a genre, or point at the existing one with the exact same name
    pub async fn create(
        &self,
        form: &GenreForm,
    ) -> AppResult<Submission<Inserted<Genre>, GenreForm>> {
        let data = match form.validated() {
            Ok(data) => data,
            Err(violations) => {
                return Ok(Submission::Invalid {
                    form: form.sanitized(),
                    violations,
                })
            }
        };

        let inserted = self.repository.create_genre(data).await?;
        match &inserted {
            Inserted::New(genre) => tracing::info!("Created genre {} ({})", genre.id, genre.name),
            Inserted::Existing(genre) => {
                tracing::debug!("Genre '{}' already exists as {}", genre.name, genre.id)
            }
        }
        Ok(Submission::Saved(inserted))
    }

    pub async fn update(&self, id: Uuid, form: &GenreForm) -> AppResult<Submission<Genre, GenreForm>> {
        let data = match form.validated() {
            Ok(data) => data,
            Err(violations) => {
                return Ok(Submission::Invalid {
                    form: form.sanitized(),
                    violations,
                })
            }
        };

        let genre = self
            .repository
            .update_genre(id, data)
            .await?
            .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;
        tracing::info!("Updated genre {}", id);
        Ok(Submission::Saved(genre))
    }
}
