//! PostgreSQL-backed store

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::{CatalogStore, Inserted};
use crate::{
    error::AppResult,
    models::{Author, AuthorData, Book, CatalogCounts, Genre, GenreData},
};

#[derive(Clone)]
pub struct PgStore {
    pub(super) pool: Pool<Postgres>,
}

impl PgStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.authors_list().await
    }

    async fn get_author(&self, id: Uuid) -> AppResult<Option<Author>> {
        self.authors_get_by_id(id).await
    }

    async fn create_author(&self, data: AuthorData) -> AppResult<Author> {
        self.authors_create(&data).await
    }

    async fn update_author(&self, id: Uuid, data: AuthorData) -> AppResult<Option<Author>> {
        self.authors_update(id, &data).await
    }

    async fn delete_author(&self, id: Uuid) -> AppResult<()> {
        self.authors_delete(id).await
    }

    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        self.books_by_author_id(author_id).await
    }

    async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        self.genres_list().await
    }

    async fn get_genre(&self, id: Uuid) -> AppResult<Option<Genre>> {
        self.genres_get_by_id(id).await
    }

    async fn create_genre(&self, data: GenreData) -> AppResult<Inserted<Genre>> {
        self.genres_create_unless_named(&data).await
    }

    async fn update_genre(&self, id: Uuid, data: GenreData) -> AppResult<Option<Genre>> {
        self.genres_update(id, &data).await
    }

    async fn delete_genre(&self, id: Uuid) -> AppResult<()> {
        self.genres_delete(id).await
    }

    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>> {
        self.books_by_genre_id(genre_id).await
    }

    async fn counts(&self) -> AppResult<CatalogCounts> {
        let (authors, genres, books): (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM authors),
                (SELECT COUNT(*) FROM genres),
                (SELECT COUNT(*) FROM books)
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(CatalogCounts {
            authors,
            genres,
            books,
        })
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
