//! Repository layer: the entity store behind the controllers

pub mod authors;
pub mod books;
pub mod genres;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use std::{ops::Deref, sync::Arc};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Author, AuthorData, Book, CatalogCounts, Genre, GenreData},
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Persistence operations needed by the author and genre controllers
///
/// Every call is attempted once; failures are returned to the caller as-is.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All authors, ascending by family name, ties in creation order
    async fn list_authors(&self) -> AppResult<Vec<Author>>;
    async fn get_author(&self, id: Uuid) -> AppResult<Option<Author>>;
    async fn create_author(&self, data: AuthorData) -> AppResult<Author>;
    /// Replace the fields of an existing author, `None` if it does not exist
    async fn update_author(&self, id: Uuid, data: AuthorData) -> AppResult<Option<Author>>;
    /// Removing an unknown id is not an error
    async fn delete_author(&self, id: Uuid) -> AppResult<()>;
    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>>;

    /// All genres, ascending by name, ties in creation order
    async fn list_genres(&self) -> AppResult<Vec<Genre>>;
    async fn get_genre(&self, id: Uuid) -> AppResult<Option<Genre>>;
    /// Insert unless a genre with exactly this (case-sensitive) name exists,
    /// checked and inserted atomically
    async fn create_genre(&self, data: GenreData) -> AppResult<Inserted<Genre>>;
    async fn update_genre(&self, id: Uuid, data: GenreData) -> AppResult<Option<Genre>>;
    async fn delete_genre(&self, id: Uuid) -> AppResult<()>;
    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>>;

    async fn counts(&self) -> AppResult<CatalogCounts>;
    /// Cheap round trip used by the readiness probe
    async fn ping(&self) -> AppResult<()>;
}

/// Outcome of an insert guarded by a uniqueness check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inserted<T> {
    New(T),
    /// The record that already held the identifying value
    Existing(T),
}

impl<T> Inserted<T> {
    pub fn into_inner(self) -> T {
        match self {
            Inserted::New(record) | Inserted::Existing(record) => record,
        }
    }
}

/// Shared handle on the configured store
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn CatalogStore>,
}

impl Repository {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub fn postgres(pool: sqlx::PgPool) -> Self {
        Self::new(Arc::new(PgStore::new(pool)))
    }

    pub fn memory() -> Self {
        Self::new(Arc::new(MemoryStore::default()))
    }
}

impl Deref for Repository {
    type Target = dyn CatalogStore;

    fn deref(&self) -> &Self::Target {
        self.store.as_ref()
    }
}
