/// Message store: create and read cheeps
///
/// Listing queries return newest-first within their scope. Ties on
/// `created_at` (bursts within one clock tick) are broken by `cheep_id` so
/// ordering stays deterministic.
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::CheepWithAuthor;

/// Insert a cheep for an author. Content constraints (non-blank, length) are
/// enforced at the protocol boundary, not here.
pub async fn create(
    pool: &SqlitePool,
    author_id: i64,
    text: &str,
    created_at: DateTime<Utc>,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO cheeps (author_id, text, created_at)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(author_id)
    .bind(text)
    .bind(created_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// All cheeps across all authors, newest-first, truncated to `limit`.
/// A zero or negative `limit` returns an empty list.
pub async fn list_global(pool: &SqlitePool, limit: i64) -> Result<Vec<CheepWithAuthor>> {
    let cheeps = sqlx::query_as::<_, CheepWithAuthor>(
        r#"
        SELECT c.text, c.created_at, a.name AS author_name
        FROM cheeps c
        JOIN authors a ON a.author_id = c.author_id
        ORDER BY c.created_at DESC, c.cheep_id DESC
        LIMIT $1
        "#,
    )
    .bind(limit.max(0))
    .fetch_all(pool)
    .await?;

    Ok(cheeps)
}

/// One author's cheeps, newest-first, truncated to `limit`. An unknown author
/// yields an empty list, not an error.
pub async fn list_for_author(
    pool: &SqlitePool,
    author_name: &str,
    limit: i64,
) -> Result<Vec<CheepWithAuthor>> {
    let cheeps = sqlx::query_as::<_, CheepWithAuthor>(
        r#"
        SELECT c.text, c.created_at, a.name AS author_name
        FROM cheeps c
        JOIN authors a ON a.author_id = c.author_id
        WHERE a.name = $1
        ORDER BY c.created_at DESC, c.cheep_id DESC
        LIMIT $2
        "#,
    )
    .bind(author_name)
    .bind(limit.max(0))
    .fetch_all(pool)
    .await?;

    Ok(cheeps)
}
