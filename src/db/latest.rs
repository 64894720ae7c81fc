/// Sequence marker storage
///
/// The simulator harness appends `?latest=<id>` to every request and later
/// reads the value back through `GET /latest` to confirm no request was
/// dropped or reordered. The marker is a single durable key-value row;
/// semantics are deliberately last-write-wins pass-through (no monotonic
/// enforcement), matching the reference implementation.
use sqlx::SqlitePool;

use crate::error::Result;

const LATEST_KEY: &str = "simulator_latest";

/// Read the marker; -1 means no command has ever been processed.
pub async fn get_latest(pool: &SqlitePool) -> Result<i64> {
    let row: Option<(i64,)> =
        sqlx::query_as("SELECT int_value FROM system_config WHERE key = $1")
            .bind(LATEST_KEY)
            .fetch_optional(pool)
            .await?;

    Ok(row.map(|(value,)| value).unwrap_or(-1))
}

/// Upsert the marker. Concurrent writers are fine; the last write wins.
pub async fn update_latest(pool: &SqlitePool, value: i64) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO system_config (key, int_value)
        VALUES ($1, $2)
        ON CONFLICT (key) DO UPDATE SET int_value = excluded.int_value
        "#,
    )
    .bind(LATEST_KEY)
    .bind(value)
    .execute(pool)
    .await?;

    Ok(())
}

/// The variant every simulator route calls: `latest` is optional on the wire,
/// and an absent value must leave the marker untouched.
pub async fn update_latest_if_present(pool: &SqlitePool, value: Option<i64>) -> Result<()> {
    match value {
        Some(value) => update_latest(pool, value).await,
        None => Ok(()),
    }
}
