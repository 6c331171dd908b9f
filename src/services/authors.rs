//! Author workflows

use uuid::Uuid;

use super::{Deletion, Submission};
use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorForm, Book},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All authors sorted by family name
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.repository.list_authors().await
    }

    /// Author and their books; a missing author is a 404
    pub async fn detail(&self, id: Uuid) -> AppResult<(Author, Vec<Book>)> {
        let (author, books) = tokio::try_join!(
            self.repository.get_author(id),
            self.repository.books_by_author(id),
        )?;
        let author = author.ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
        Ok((author, books))
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Option<Author>> {
        self.repository.get_author(id).await
    }

    /// Author and the books that would block its deletion
    pub async fn delete_preview(&self, id: Uuid) -> AppResult<Option<(Author, Vec<Book>)>> {
        let (author, books) = tokio::try_join!(
            self.repository.get_author(id),
            self.repository.books_by_author(id),
        )?;
        Ok(author.map(|author| (author, books)))
    }

    /// Delete unless books still reference the author
    pub async fn delete(&self, id: Uuid) -> AppResult<Deletion<Author>> {
        let (author, books) = tokio::try_join!(
            self.repository.get_author(id),
            self.repository.books_by_author(id),
        )?;

        if !books.is_empty() {
            tracing::info!("Author {} has {} book(s), refusing delete", id, books.len());
            return Ok(Deletion::Blocked {
                record: author,
                books,
            });
        }

        self.repository.delete_author(id).await?;
        tracing::info!("Deleted author {}", id);
        Ok(Deletion::Deleted)
    }

    /// Create an author; unlike genres, identical names are allowed
    pub async fn create(&self, form: &AuthorForm) -> AppResult<Submission<Author, AuthorForm>> {
        let data = match form.validated() {
            Ok(data) => data,
            Err(violations) => {
                return Ok(Submission::Invalid {
                    form: form.sanitized(),
                    violations,
                })
            }
        };

        let author = self.repository.create_author(data).await?;
        tracing::info!("Created author {} ({})", author.id, author.name());
        Ok(Submission::Saved(author))
    }

    pub async fn update(
        &self,
        id: Uuid,
        form: &AuthorForm,
    ) -> AppResult<Submission<Author, AuthorForm>> {
        let data = match form.validated() {
            Ok(data) => data,
            Err(violations) => {
                return Ok(Submission::Invalid {
                    form: form.sanitized(),
                    violations,
                })
            }
        };

        let author = self
            .repository
            .update_author(id, data)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
        tracing::info!("Updated author {}", id);
        Ok(Submission::Saved(author))
    }
}
