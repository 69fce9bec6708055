//! Database layer - connection pool, readiness tracking and repositories
//!
//! # Design Principles
//!
//! - Handlers only see the `LibraryStore` trait, never the pool
//! - The pool connects lazily; readiness is tracked separately by a monitor
//! - Relationship resolution is a single LEFT JOIN, not a query per book
//! - No foreign keys: a book may reference an author that does not exist

pub mod memory;
pub mod migrations;
pub mod monitor;
pub mod pg;
pub mod pool;
pub mod readiness;
pub mod repos;
pub mod store;

pub use memory::MemoryStore;
pub use pg::PgStore;
pub use pool::create_pool;
pub use readiness::{ConnectionState, Readiness};
pub use repos::{parse_id, AuthorRepo, BookRepo, DbError};
pub use store::LibraryStore;
