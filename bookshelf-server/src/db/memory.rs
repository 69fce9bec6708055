//! In-process store
//!
//! Keeps both collections in insertion order behind a lock. The connection
//! state is set by hand, which lets tests drive the availability gate
//! without a database. While not connected every operation fails with
//! [`DbError::Unavailable`], the way a real client would.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{parse_id, ConnectionState, DbError, LibraryStore, Readiness};
use crate::models::{Author, Book, BookWithAuthor};

#[derive(Debug, Default)]
struct Collections {
    authors: Vec<Author>,
    books: Vec<Book>,
}

/// Store held entirely in memory.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    data: Arc<RwLock<Collections>>,
    readiness: Readiness,
}

impl MemoryStore {
    /// Empty store in the `Connected` state.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(Collections::default())),
            readiness: Readiness::new(ConnectionState::Connected),
        }
    }

    pub fn set_connection_state(&self, state: ConnectionState) {
        self.readiness.set(state);
    }

    pub fn readiness(&self) -> &Readiness {
        &self.readiness
    }

    fn ensure_connected(&self) -> Result<(), DbError> {
        match self.readiness.get() {
            ConnectionState::Connected => Ok(()),
            other => Err(DbError::Unavailable(other)),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LibraryStore for MemoryStore {
    fn connection_state(&self) -> ConnectionState {
        self.readiness.get()
    }

    async fn list_authors(&self) -> Result<Vec<Author>, DbError> {
        self.ensure_connected()?;
        Ok(self.data.read().await.authors.clone())
    }

    async fn find_author(&self, id: &str) -> Result<Option<Author>, DbError> {
        self.ensure_connected()?;
        let id = parse_id(id)?;
        let data = self.data.read().await;
        Ok(data.authors.iter().find(|a| a.id == id).cloned())
    }

    async fn books_by_author(&self, author: Uuid) -> Result<Vec<Book>, DbError> {
        self.ensure_connected()?;
        let data = self.data.read().await;
        Ok(data
            .books
            .iter()
            .filter(|b| b.author == Some(author))
            .cloned()
            .collect())
    }

    async fn list_books_with_authors(&self) -> Result<Vec<BookWithAuthor>, DbError> {
        self.ensure_connected()?;
        let data = self.data.read().await;
        Ok(data
            .books
            .iter()
            .cloned()
            .map(|book| {
                BookWithAuthor::resolve(book, |id| {
                    data.authors.iter().find(|a| a.id == id).cloned()
                })
            })
            .collect())
    }

    async fn delete_all_authors(&self) -> Result<u64, DbError> {
        self.ensure_connected()?;
        let mut data = self.data.write().await;
        let removed = data.authors.len() as u64;
        data.authors.clear();
        Ok(removed)
    }

    async fn delete_all_books(&self) -> Result<u64, DbError> {
        self.ensure_connected()?;
        let mut data = self.data.write().await;
        let removed = data.books.len() as u64;
        data.books.clear();
        Ok(removed)
    }

    async fn insert_author(&self, name: &str) -> Result<Author, DbError> {
        self.ensure_connected()?;
        let author = Author {
            id: Uuid::new_v4(),
            name: name.to_owned(),
        };
        self.data.write().await.authors.push(author.clone());
        Ok(author)
    }

    async fn insert_book(&self, title: &str, author: Option<Uuid>) -> Result<Book, DbError> {
        self.ensure_connected()?;
        let book = Book {
            id: Uuid::new_v4(),
            title: title.to_owned(),
            author,
        };
        self.data.write().await.books.push(book.clone());
        Ok(book)
    }
}
