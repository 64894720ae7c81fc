/// Follow graph: directed edges between authors
use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::Result;

/// Idempotent create follow; returns true if a new edge was inserted.
pub async fn follow(pool: &SqlitePool, follower_id: i64, followee_id: i64) -> Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO follows (follower_id, followee_id, created_at)
        VALUES ($1, $2, $3)
        ON CONFLICT (follower_id, followee_id) DO NOTHING
        "#,
    )
    .bind(follower_id)
    .bind(followee_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Idempotent delete; returns true if an edge was removed.
pub async fn unfollow(pool: &SqlitePool, follower_id: i64, followee_id: i64) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM follows
        WHERE follower_id = $1 AND followee_id = $2
        "#,
    )
    .bind(follower_id)
    .bind(followee_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Names the given author follows, in follow order. Empty for authors with
/// no follows and for unknown authors alike; not-found is not surfaced here.
pub async fn list_following(pool: &SqlitePool, follower_name: &str) -> Result<Vec<String>> {
    let rows = sqlx::query_as::<_, (String,)>(
        r#"
        SELECT followee.name
        FROM follows f
        JOIN authors follower ON follower.author_id = f.follower_id
        JOIN authors followee ON followee.author_id = f.followee_id
        WHERE follower.name = $1
        ORDER BY f.created_at, followee.author_id
        "#,
    )
    .bind(follower_name)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(name,)| name).collect())
}
