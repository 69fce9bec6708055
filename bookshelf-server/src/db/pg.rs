//! PostgreSQL-backed store

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::{monitor, parse_id, AuthorRepo, BookRepo, ConnectionState, DbError, LibraryStore, Readiness};
use crate::models::{Author, Book, BookWithAuthor};

/// Store over a PostgreSQL pool plus its readiness tracker.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    readiness: Readiness,
}

impl PgStore {
    /// Wrap a pool. The state starts as `Connecting` until the monitor's
    /// first successful ping.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            readiness: Readiness::new(ConnectionState::Connecting),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn readiness(&self) -> &Readiness {
        &self.readiness
    }

    /// Start the background readiness monitor.
    pub fn spawn_monitor(&self, interval: Duration) -> JoinHandle<()> {
        tokio::spawn(monitor::run(
            self.pool.clone(),
            self.readiness.clone(),
            interval,
        ))
    }

    /// Mark the store as going away and close the pool.
    pub async fn close(&self) {
        self.readiness.set(ConnectionState::Disconnecting);
        self.pool.close().await;
        self.readiness.set(ConnectionState::Disconnected);
        tracing::info!("Database pool closed");
    }
}

#[async_trait]
impl LibraryStore for PgStore {
    fn connection_state(&self) -> ConnectionState {
        self.readiness.get()
    }

    async fn list_authors(&self) -> Result<Vec<Author>, DbError> {
        AuthorRepo::new(&self.pool).list().await
    }

    async fn find_author(&self, id: &str) -> Result<Option<Author>, DbError> {
        let id = parse_id(id)?;
        AuthorRepo::new(&self.pool).get(id).await
    }

    async fn books_by_author(&self, author: Uuid) -> Result<Vec<Book>, DbError> {
        BookRepo::new(&self.pool).list_by_author(author).await
    }

    async fn list_books_with_authors(&self) -> Result<Vec<BookWithAuthor>, DbError> {
        BookRepo::new(&self.pool).list_with_authors().await
    }

    async fn delete_all_authors(&self) -> Result<u64, DbError> {
        AuthorRepo::new(&self.pool).delete_all().await
    }

    async fn delete_all_books(&self) -> Result<u64, DbError> {
        BookRepo::new(&self.pool).delete_all().await
    }

    async fn insert_author(&self, name: &str) -> Result<Author, DbError> {
        AuthorRepo::new(&self.pool).insert(name).await
    }

    async fn insert_book(&self, title: &str, author: Option<Uuid>) -> Result<Book, DbError> {
        BookRepo::new(&self.pool).insert(title, author).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, migrations};

    async fn store() -> PgStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let store = PgStore::new(create_pool(&url).expect("pool creation failed"));
        migrations::run(store.pool()).await.expect("migrations failed");
        store
    }

    #[tokio::test]
    async fn starts_connecting() {
        let pool = create_pool("postgres://localhost:1/books").unwrap();
        let store = PgStore::new(pool);
        assert_eq!(store.connection_state(), ConnectionState::Connecting);
    }

    #[tokio::test]
    async fn close_ends_disconnected() {
        let pool = create_pool("postgres://localhost:1/books").unwrap();
        let store = PgStore::new(pool);
        store.close().await;
        assert_eq!(store.connection_state(), ConnectionState::Disconnected);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn join_resolves_and_tolerates_dangling_reference() {
        let store = store().await;
        store.delete_all_books().await.unwrap();
        store.delete_all_authors().await.unwrap();

        let author = store.insert_author("Ursula K. Le Guin").await.unwrap();
        store.insert_book("A Wizard of Earthsea", Some(author.id)).await.unwrap();
        store.insert_book("Orphan", Some(Uuid::new_v4())).await.unwrap();
        store.insert_book("Anonymous", None).await.unwrap();

        let books = store.list_books_with_authors().await.unwrap();
        assert_eq!(books.len(), 3);
        assert_eq!(books[0].author.as_ref(), Some(&author));
        assert!(books[1].author.is_none());
        assert!(books[2].author.is_none());

        let by_author = store.books_by_author(author.id).await.unwrap();
        assert_eq!(by_author.len(), 1);
        assert_eq!(by_author[0].author, Some(author.id));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn malformed_id_is_rejected_before_query() {
        let store = store().await;
        let err = store.find_author("xyz").await.unwrap_err();
        assert!(matches!(err, DbError::InvalidId(_)));
    }
}
