//! Schema bootstrap for the `authors` and `books` collections
//!
//! `seq` only preserves insertion order for listing. `books.author` has no
//! foreign key and no index.

use sqlx::PgPool;

/// Create both tables if they do not exist yet.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::debug!("Running schema migrations");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS authors (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            seq BIGSERIAL NOT NULL,
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            seq BIGSERIAL NOT NULL,
            title TEXT NOT NULL,
            author UUID
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn migrations_are_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).expect("pool creation failed");

        run(&pool).await.expect("first run");
        run(&pool).await.expect("second run");
    }
}
