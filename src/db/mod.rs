/// Database access layer
///
/// This module provides:
/// - Database connection pooling
/// - Schema bootstrap (lazily created at service startup)
/// - Query functions for authors, cheeps, follows, and the sequence marker
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::error::Result;

pub mod authors;
pub mod cheeps;
pub mod follows;
pub mod latest;

/// Create the SQLite connection pool, creating the database file on first run.
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool> {
    // WAL lets readers proceed while a writer holds the lock; the default
    // rollback journal serializes the whole pool behind one writer.
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Ensure the simulator API tables exist.
///
/// Created lazily at service startup to unblock environments where no
/// migration has been applied yet (fresh developer machines, CI spins).
pub async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
    info!("Ensuring simulator API tables exist");

    sqlx::query(AUTHORS_TABLE).execute(pool).await?;
    sqlx::query(CHEEPS_TABLE).execute(pool).await?;
    sqlx::query(CHEEPS_AUTHOR_INDEX).execute(pool).await?;
    sqlx::query(FOLLOWS_TABLE).execute(pool).await?;
    sqlx::query(SYSTEM_CONFIG_TABLE).execute(pool).await?;

    Ok(())
}

// Name uniqueness lives in the schema so that concurrent duplicate
// registrations resolve to exactly one winner.
const AUTHORS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS authors (
    author_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    email TEXT NOT NULL
)
"#;

const CHEEPS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS cheeps (
    cheep_id INTEGER PRIMARY KEY AUTOINCREMENT,
    author_id INTEGER NOT NULL REFERENCES authors (author_id),
    text TEXT NOT NULL,
    created_at TEXT NOT NULL
)
"#;

const CHEEPS_AUTHOR_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_cheeps_author_created
ON cheeps (author_id, created_at DESC)
"#;

const FOLLOWS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS follows (
    follower_id INTEGER NOT NULL REFERENCES authors (author_id),
    followee_id INTEGER NOT NULL REFERENCES authors (author_id),
    created_at TEXT NOT NULL,
    PRIMARY KEY (follower_id, followee_id)
)
"#;

const SYSTEM_CONFIG_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS system_config (
    key TEXT PRIMARY KEY,
    int_value INTEGER NOT NULL
)
"#;
