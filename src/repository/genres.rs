//! Genre queries on the PostgreSQL store

use uuid::Uuid;

use super::{Inserted, PgStore};
use crate::{
    error::AppResult,
    models::{Genre, GenreData},
};

impl PgStore {
    pub async fn genres_list(&self) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, Genre>(
            r#"SELECT id, name FROM genres ORDER BY name COLLATE "C", created_at, id"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn genres_get_by_id(&self, id: Uuid) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Insert a genre unless one with exactly this name exists
    ///
    /// The name is locked for the duration of the transaction, so two
    /// concurrent submissions of the same name cannot both insert.
    pub async fn genres_create_unless_named(
        &self,
        data: &GenreData,
    ) -> AppResult<Inserted<Genre>> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(&data.name)
            .execute(&mut *tx)
            .await?;

        let existing = sqlx::query_as::<_, Genre>(
            "SELECT id, name FROM genres WHERE name = $1 ORDER BY created_at LIMIT 1",
        )
        .bind(&data.name)
        .fetch_optional(&mut *tx)
        .await?;

        let inserted = match existing {
            Some(genre) => Inserted::Existing(genre),
            None => {
                let genre = sqlx::query_as::<_, Genre>(
                    "INSERT INTO genres (id, name) VALUES ($1, $2) RETURNING id, name",
                )
                .bind(Uuid::new_v4())
                .bind(&data.name)
                .fetch_one(&mut *tx)
                .await?;
                Inserted::New(genre)
            }
        };

        tx.commit().await?;
        Ok(inserted)
    }

    pub async fn genres_update(&self, id: Uuid, data: &GenreData) -> AppResult<Option<Genre>> {
        let row = sqlx::query_as::<_, Genre>(
            "UPDATE genres SET name = $2 WHERE id = $1 RETURNING id, name",
        )
        .bind(id)
        .bind(&data.name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn genres_delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
