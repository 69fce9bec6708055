//! Fixture seeder
//!
//! Clears both collections and inserts a fixed set of authors and books.
//! The steps are not transactional: if one fails, the collections are left
//! however far the run got (possibly emptied and only partly refilled).

use std::collections::HashMap;
use std::sync::Arc;

use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::db::{DbError, LibraryStore, Readiness};

/// A fixture book, tied to its author by name.
#[derive(Debug, Clone, Copy)]
pub struct FixtureBook {
    pub title: &'static str,
    pub author: &'static str,
}

/// Authors in insertion order.
pub const AUTHORS: &[&str] = &["J.R.R. Tolkien", "J.K. Rowling"];

/// Books in insertion order.
pub const BOOKS: &[FixtureBook] = &[
    FixtureBook {
        title: "Harry Potter and the Philosopher's Stone",
        author: "J.K. Rowling",
    },
    FixtureBook {
        title: "Harry Potter and the Chambers of Secrets",
        author: "J.K. Rowling",
    },
    FixtureBook {
        title: "Harry Potter and the Prisoner of Azkaban",
        author: "J.K. Rowling",
    },
    FixtureBook {
        title: "Harry Potter and the Goblet of Fire",
        author: "J.K. Rowling",
    },
    FixtureBook {
        title: "Harry Potter and the Order of the Phoenix",
        author: "J.K. Rowling",
    },
    FixtureBook {
        title: "Harry Potter and the Half-Blood Prince",
        author: "J.K. Rowling",
    },
    FixtureBook {
        title: "Harry Potter and the Deathly Hollows",
        author: "J.K. Rowling",
    },
    FixtureBook {
        title: "The Lord of the Rings",
        author: "J.R.R. Tolkien",
    },
    FixtureBook {
        title: "The Hobbit",
        author: "J.R.R. Tolkien",
    },
];

/// What a seeding run did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedReport {
    pub authors_removed: u64,
    pub books_removed: u64,
    pub authors_inserted: usize,
    pub books_inserted: usize,
}

/// Clear both collections, then insert the fixture.
///
/// Order: delete authors, delete books, insert authors, insert books.
pub async fn run(store: &dyn LibraryStore) -> Result<SeedReport, DbError> {
    let mut report = SeedReport {
        authors_removed: store.delete_all_authors().await?,
        books_removed: store.delete_all_books().await?,
        ..SeedReport::default()
    };

    let mut ids: HashMap<&str, Uuid> = HashMap::with_capacity(AUTHORS.len());
    for &name in AUTHORS {
        let author = store.insert_author(name).await?;
        ids.insert(name, author.id);
        report.authors_inserted += 1;
    }

    for book in BOOKS {
        store
            .insert_book(book.title, ids.get(book.author).copied())
            .await?;
        report.books_inserted += 1;
    }

    Ok(report)
}

/// Run the seeder in the background once the store is connected.
///
/// Failures are logged and do not affect request handling.
pub fn spawn(store: Arc<dyn LibraryStore>, readiness: Readiness) -> JoinHandle<()> {
    tokio::spawn(async move {
        readiness.connected().await;
        tracing::info!("Resetting database");

        match run(store.as_ref()).await {
            Ok(report) => tracing::info!(
                authors_removed = report.authors_removed,
                books_removed = report.books_removed,
                authors_inserted = report.authors_inserted,
                books_inserted = report.books_inserted,
                "Database seeded"
            ),
            Err(e) => tracing::error!(error = %e, "Seeding failed; collections may be partially seeded"),
        }
    })
}
