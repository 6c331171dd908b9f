//! Data models for the catalog

pub mod author;
pub mod book;
pub mod genre;

// Re-export commonly used types
pub use author::{Author, AuthorData, AuthorForm};
pub use book::Book;
pub use genre::{Genre, GenreData, GenreForm};

/// Record counts shown on the catalog home page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogCounts {
    pub authors: i64,
    pub genres: i64,
    pub books: i64,
}
