//! Book record and its author-resolved view
//!
//! A book holds a back-reference to its author. The reference is not
//! checked by the store, so it may point at an author that no longer exists.

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::Author;

/// Book document with the raw author reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: Option<Uuid>,
}

/// Book with its author reference resolved inline.
///
/// `author` is `None` when the reference is unset or dangling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookWithAuthor {
    pub id: Uuid,
    pub title: String,
    pub author: Option<Author>,
}

impl BookWithAuthor {
    /// Resolve a book against an author lookup.
    pub fn resolve(book: Book, lookup: impl FnOnce(Uuid) -> Option<Author>) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author.and_then(lookup),
        }
    }
}
