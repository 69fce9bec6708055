//! Domain records as stored in the `authors` and `books` collections

pub mod author;
pub mod book;

pub use author::Author;
pub use book::{Book, BookWithAuthor};
