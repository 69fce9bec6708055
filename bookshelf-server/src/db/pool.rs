//! Database connection pool management
//!
//! The pool is created lazily so the server can start while PostgreSQL is
//! still down. Whether the pool can actually reach the database is tracked
//! by [`crate::db::monitor`].

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long a query waits for a free (or new) connection before failing.
const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(3);

/// Create a lazily connecting PostgreSQL pool.
///
/// # Errors
///
/// Returns an error only if `database_url` cannot be parsed. No connection
/// is opened here.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/books")?;
/// ```
pub fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS)
}

/// Create a lazily connecting PostgreSQL pool with a custom connection limit.
pub fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(DEFAULT_ACQUIRE_TIMEOUT)
        .connect_lazy(database_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lazy_pool_does_not_connect() {
        // Nothing listens on this port; creation must still succeed.
        let pool = create_pool("postgres://localhost:1/books").expect("url should parse");
        assert_eq!(pool.size(), 0);
    }

    #[tokio::test]
    async fn rejects_malformed_url() {
        assert!(create_pool("not a url").is_err());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_acquires_connection() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).expect("pool creation failed");

        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(result.0, 1);
    }
}
