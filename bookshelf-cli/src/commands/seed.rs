//! One-shot seed command

use anyhow::{Context, Result};
use clap::Parser;

use bookshelf_server::config::DEFAULT_DATABASE_URL;
use bookshelf_server::db::{create_pool, migrations};
use bookshelf_server::{seed, PgStore};

/// Arguments for the seed command
#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,
}

/// Reset the database to the fixture dataset
pub async fn run_seed(args: SeedArgs) -> Result<()> {
    let pool = create_pool(&args.database_url).context("Invalid database URL")?;
    let store = PgStore::new(pool);

    let outcome = async {
        migrations::run(store.pool())
            .await
            .context("Failed to create tables")?;
        seed::run(&store).await.context("Seeding failed")
    }
    .await;
    store.close().await;

    let report = outcome?;
    tracing::info!(
        authors_removed = report.authors_removed,
        books_removed = report.books_removed,
        authors_inserted = report.authors_inserted,
        books_inserted = report.books_inserted,
        "Database seeded"
    );
    Ok(())
}
