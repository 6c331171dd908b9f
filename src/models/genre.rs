//! Genre model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}

impl Genre {
    pub fn from_data(id: Uuid, data: GenreData) -> Self {
        Self { id, name: data.name }
    }

    /// Canonical URL of the genre detail page
    pub fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id)
    }
}

/// Validated genre fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreData {
    pub name: String,
}

/// Raw genre form submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GenreForm {
    #[validate(length(min = 1, message = "Genre name required"))]
    pub name: String,
}

impl From<&Genre> for GenreForm {
    fn from(genre: &Genre) -> Self {
        Self {
            name: genre.name.clone(),
        }
    }
}
