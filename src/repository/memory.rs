//! In-process store
//!
//! Records live in insertion-ordered maps, which gives list queries the same
//! creation-order tie breaking as the PostgreSQL store.

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CatalogStore, Inserted};
use crate::{
    error::AppResult,
    models::{Author, AuthorData, Book, CatalogCounts, Genre, GenreData},
};

#[derive(Default)]
struct Records {
    authors: IndexMap<Uuid, Author>,
    genres: IndexMap<Uuid, Genre>,
    books: IndexMap<Uuid, Book>,
}

#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Records>,
}

impl MemoryStore {
    /// Books are managed outside the author and genre controllers; this is
    /// how they enter an in-process catalog.
    pub async fn insert_book(&self, book: Book) {
        self.records.write().await.books.insert(book.id, book);
    }

    pub async fn remove_book(&self, id: Uuid) -> Option<Book> {
        self.records.write().await.books.shift_remove(&id)
    }
}

fn sorted_by<T: Clone>(values: impl Iterator<Item = T>, key: impl Fn(&T) -> &str) -> Vec<T> {
    let mut rows: Vec<T> = values.collect();
    // stable: equal keys keep insertion order
    rows.sort_by(|a, b| key(a).cmp(key(b)));
    rows
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        let records = self.records.read().await;
        Ok(sorted_by(records.authors.values().cloned(), |a| {
            a.family_name.as_str()
        }))
    }

    async fn get_author(&self, id: Uuid) -> AppResult<Option<Author>> {
        Ok(self.records.read().await.authors.get(&id).cloned())
    }

    async fn create_author(&self, data: AuthorData) -> AppResult<Author> {
        let author = Author::from_data(Uuid::new_v4(), data);
        self.records
            .write()
            .await
            .authors
            .insert(author.id, author.clone());
        Ok(author)
    }

    async fn update_author(&self, id: Uuid, data: AuthorData) -> AppResult<Option<Author>> {
        let mut records = self.records.write().await;
        Ok(records.authors.get_mut(&id).map(|author| {
            *author = Author::from_data(id, data);
            author.clone()
        }))
    }

    async fn delete_author(&self, id: Uuid) -> AppResult<()> {
        self.records.write().await.authors.shift_remove(&id);
        Ok(())
    }

    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        let records = self.records.read().await;
        let books = records
            .books
            .values()
            .filter(|book| book.author_id == author_id)
            .cloned();
        Ok(sorted_by(books, |b| b.title.as_str()))
    }

    async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        let records = self.records.read().await;
        Ok(sorted_by(records.genres.values().cloned(), |g| g.name.as_str()))
    }

    async fn get_genre(&self, id: Uuid) -> AppResult<Option<Genre>> {
        Ok(self.records.read().await.genres.get(&id).cloned())
    }

    async fn create_genre(&self, data: GenreData) -> AppResult<Inserted<Genre>> {
        // lookup and insert under one write lock
        let mut records = self.records.write().await;
        if let Some(existing) = records.genres.values().find(|g| g.name == data.name) {
            return Ok(Inserted::Existing(existing.clone()));
        }
        let genre = Genre::from_data(Uuid::new_v4(), data);
        records.genres.insert(genre.id, genre.clone());
        Ok(Inserted::New(genre))
    }

    async fn update_genre(&self, id: Uuid, data: GenreData) -> AppResult<Option<Genre>> {
        let mut records = self.records.write().await;
        Ok(records.genres.get_mut(&id).map(|genre| {
            *genre = Genre::from_data(id, data);
            genre.clone()
        }))
    }

    async fn delete_genre(&self, id: Uuid) -> AppResult<()> {
        self.records.write().await.genres.shift_remove(&id);
        Ok(())
    }

    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>> {
        let records = self.records.read().await;
        let books = records
            .books
            .values()
            .filter(|book| book.genre_ids.contains(&genre_id))
            .cloned();
        Ok(sorted_by(books, |b| b.title.as_str()))
    }

    async fn counts(&self) -> AppResult<CatalogCounts> {
        let records = self.records.read().await;
        Ok(CatalogCounts {
            authors: records.authors.len() as i64,
            genres: records.genres.len() as i64,
            books: records.books.len() as i64,
        })
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
