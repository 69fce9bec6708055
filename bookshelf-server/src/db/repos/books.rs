//! Book repository
//!
//! `list_with_authors` resolves the author reference with a LEFT JOIN so a
//! dangling or unset reference comes back as `None`.

use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::DbError;
use crate::models::{Author, Book, BookWithAuthor};

/// Book repository
pub struct BookRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> BookRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Books whose author reference equals `author`, in insertion order.
    ///
    /// Plain equality filter on `books.author`; there is no index on it.
    pub async fn list_by_author(&self, author: Uuid) -> Result<Vec<Book>, DbError> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT id, title, author FROM books WHERE author = $1 ORDER BY seq",
        )
        .bind(author)
        .fetch_all(self.pool)
        .await?;
        Ok(books)
    }

    /// All books with the author reference expanded inline.
    pub async fn list_with_authors(&self) -> Result<Vec<BookWithAuthor>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                b.id,
                b.title,
                a.id AS author_id,
                a.name AS author_name
            FROM books b
            LEFT JOIN authors a ON a.id = b.author
            ORDER BY b.seq
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter()
            .map(|r| -> Result<BookWithAuthor, DbError> {
                let author_id: Option<Uuid> = r.try_get("author_id")?;
                let author_name: Option<String> = r.try_get("author_name")?;
                Ok(BookWithAuthor {
                    id: r.try_get("id")?,
                    title: r.try_get("title")?,
                    author: author_id
                        .zip(author_name)
                        .map(|(id, name)| Author { id, name }),
                })
            })
            .collect()
    }

    /// Insert a book. `author` is stored as given, without checking it exists.
    pub async fn insert(&self, title: &str, author: Option<Uuid>) -> Result<Book, DbError> {
        let book = sqlx::query_as::<_, Book>(
            "INSERT INTO books (title, author) VALUES ($1, $2) RETURNING id, title, author",
        )
        .bind(title)
        .bind(author)
        .fetch_one(self.pool)
        .await?;
        Ok(book)
    }

    /// Remove every book.
    pub async fn delete_all(&self) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM books").execute(self.pool).await?;
        Ok(result.rows_affected())
    }
}
