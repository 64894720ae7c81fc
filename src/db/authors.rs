/// Identity lookup and registration
use sqlx::SqlitePool;

use crate::error::{AppError, Result};
use crate::models::Author;

/// Find an author by exact (case-sensitive) name. Absent is not an error;
/// callers decide between 404 and proceed.
pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Author>> {
    let author = sqlx::query_as::<_, Author>(
        r#"
        SELECT author_id, name, email
        FROM authors
        WHERE name = $1
        "#,
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(author)
}

/// Insert a new author.
///
/// Uniqueness is enforced by the schema rather than a read-then-write check,
/// so two concurrent registrations of the same name resolve to one winner;
/// the loser gets `AppError::Conflict`.
pub async fn create(pool: &SqlitePool, name: &str, email: &str) -> Result<Author> {
    let inserted = sqlx::query_as::<_, Author>(
        r#"
        INSERT INTO authors (name, email)
        VALUES ($1, $2)
        RETURNING author_id, name, email
        "#,
    )
    .bind(name)
    .bind(email)
    .fetch_one(pool)
    .await;

    match inserted {
        Ok(author) => Ok(author),
        Err(sqlx::Error::Database(db_err))
            if db_err.kind() == sqlx::error::ErrorKind::UniqueViolation =>
        {
            Err(AppError::Conflict("Username already taken".to_string()))
        }
        Err(err) => Err(err.into()),
    }
}
