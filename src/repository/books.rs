//! Book lookups on the PostgreSQL store (read-only)

use uuid::Uuid;

use super::PgStore;
use crate::{error::AppResult, models::Book};

const BOOK_COLUMNS: &str = "id, title, summary, isbn, author_id, genre_ids";

impl PgStore {
    pub async fn books_by_author_id(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE author_id = $1 ORDER BY title"
        ))
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn books_by_genre_id(&self, genre_id: Uuid) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE $1 = ANY(genre_ids) ORDER BY title"
        ))
        .bind(genre_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
