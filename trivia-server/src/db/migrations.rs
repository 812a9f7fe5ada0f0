//! Schema migrations for the trivia tables

use sqlx::PgPool;

use super::store::StoreResult;
use crate::models::DEFAULT_CATEGORIES;

/// Create tables and indexes if missing. Safe to run on every startup.
///
/// When `seed` is set and the categories table is empty, the standard
/// categories are inserted.
pub async fn run(pool: &PgPool, seed: bool) -> StoreResult<()> {
    tracing::info!("Running trivia migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS categories (
            id SERIAL PRIMARY KEY,
            type TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS questions (
            id SERIAL PRIMARY KEY,
            question TEXT NOT NULL CHECK (length(trim(question)) > 0),
            answer TEXT NOT NULL,
            category INTEGER NOT NULL,
            difficulty INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_questions_category ON questions(category)")
        .execute(pool)
        .await?;

    if seed {
        seed_categories(pool).await?;
    }

    tracing::info!("Trivia migrations complete");
    Ok(())
}

async fn seed_categories(pool: &PgPool) -> StoreResult<()> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        tracing::debug!(count, "categories already present, skipping seed");
        return Ok(());
    }

    let mut tx = pool.begin().await?;
    for name in DEFAULT_CATEGORIES {
        sqlx::query("INSERT INTO categories (type) VALUES ($1)")
            .bind(name)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    tracing::info!(count = DEFAULT_CATEGORIES.len(), "Seeded default categories");
    Ok(())
}
