//! Author repository

use sqlx::PgPool;
use uuid::Uuid;

use super::DbError;
use crate::models::Author;

/// Author repository
pub struct AuthorRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> AuthorRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All authors in insertion order.
    pub async fn list(&self) -> Result<Vec<Author>, DbError> {
        let authors = sqlx::query_as::<_, Author>("SELECT id, name FROM authors ORDER BY seq")
            .fetch_all(self.pool)
            .await?;
        Ok(authors)
    }

    /// Single author by id, `None` if absent.
    pub async fn get(&self, id: Uuid) -> Result<Option<Author>, DbError> {
        let author = sqlx::query_as::<_, Author>("SELECT id, name FROM authors WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(author)
    }

    /// Insert an author; the store assigns the id.
    pub async fn insert(&self, name: &str) -> Result<Author, DbError> {
        let author = sqlx::query_as::<_, Author>(
            "INSERT INTO authors (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(self.pool)
        .await?;
        Ok(author)
    }

    /// Remove every author. Books referencing them are left in place.
    pub async fn delete_all(&self) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM authors").execute(self.pool).await?;
        Ok(result.rows_affected())
    }
}
