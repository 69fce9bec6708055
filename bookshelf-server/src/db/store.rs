//! Store abstraction injected into the gate, the handlers and the seeder

use async_trait::async_trait;
use uuid::Uuid;

use super::{ConnectionState, DbError};
use crate::models::{Author, Book, BookWithAuthor};

/// Read and seed operations over the two collections.
///
/// Implemented by [`crate::db::PgStore`] for production and
/// [`crate::db::MemoryStore`] for tests.
#[async_trait]
pub trait LibraryStore: Send + Sync {
    /// Current connection state of the underlying client.
    fn connection_state(&self) -> ConnectionState;

    async fn list_authors(&self) -> Result<Vec<Author>, DbError>;

    /// Look up an author by a raw id. A malformed id is an error, an
    /// unknown one is `Ok(None)`.
    async fn find_author(&self, id: &str) -> Result<Option<Author>, DbError>;

    async fn books_by_author(&self, author: Uuid) -> Result<Vec<Book>, DbError>;

    /// All books with the author reference resolved.
    async fn list_books_with_authors(&self) -> Result<Vec<BookWithAuthor>, DbError>;

    async fn delete_all_authors(&self) -> Result<u64, DbError>;

    async fn delete_all_books(&self) -> Result<u64, DbError>;

    async fn insert_author(&self, name: &str) -> Result<Author, DbError>;

    async fn insert_book(&self, title: &str, author: Option<Uuid>) -> Result<Book, DbError>;
}
