/// Row types shared between the database layer and handlers
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A registered author. `name` is the external key used in all simulator
/// URLs and is unique (enforced by the schema).
#[derive(Debug, Clone, FromRow)]
pub struct Author {
    pub author_id: i64,
    pub name: String,
    pub email: String,
}

/// A cheep joined with its author's name, as read back for message feeds.
#[derive(Debug, Clone, FromRow)]
pub struct CheepWithAuthor {
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub author_name: String,
}
