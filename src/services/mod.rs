//! Business logic services

pub mod authors;
pub mod catalog;
pub mod genres;

use crate::{models::Book, repository::Repository, validation::Violations};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub genres: genres::GenresService,
    pub catalog: catalog::CatalogService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            authors: authors::AuthorsService::new(repository.clone()),
            genres: genres::GenresService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository),
        }
    }
}

/// Result of a create or update form submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission<T, F> {
    /// Nothing was persisted; the form is shown again with its errors
    Invalid { form: F, violations: Violations },
    Saved(T),
}

/// Result of a delete request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deletion<T> {
    /// Dependent books still reference the record; nothing was deleted
    Blocked { record: Option<T>, books: Vec<Book> },
    Deleted,
}
