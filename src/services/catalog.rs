//! Catalog-wide queries

use crate::{error::AppResult, models::CatalogCounts, repository::Repository};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Record counts for the home page
    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        self.repository.counts().await
    }

    /// Check that the store answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
