/// Simulator protocol handlers
///
/// Every route follows the same shape: update the sequence marker first
/// (`latest` is optional on every request, and the marker must advance even
/// when the rest of the request fails validation), then validate input,
/// delegate to the database layer, and map the result onto the wire contract.
/// Authorization has already happened in the middleware by the time a handler
/// runs, so a rejected request can never advance the marker.
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db;
use crate::error::{AppError, Result};

/// Maximum cheep length, counted on raw content (the blank check trims,
/// the length check does not).
const MAX_MESSAGE_LENGTH: usize = 160;

/// Default page size when the harness omits `no`.
const DEFAULT_MESSAGE_COUNT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct SequenceQuery {
    pub latest: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct MessagesQuery {
    pub no: Option<i64>,
    pub latest: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub pwd: String,
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct FollowRequest {
    pub follow: Option<String>,
    pub unfollow: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LatestResponse {
    pub latest: i64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub content: String,
    pub pub_date: String,
    pub user: String,
}

#[derive(Debug, Serialize)]
pub struct FollowsResponse {
    pub follows: Vec<String>,
}

/// Render a timestamp the way the harness expects: the invariant-culture
/// `DateTime.ToString()` shape of the reference implementation,
/// e.g. `08/28/2026 14:03:57`.
fn format_pub_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%m/%d/%Y %H:%M:%S").to_string()
}

/// GET /latest - the last command id the harness has pushed, -1 if none yet.
pub async fn get_latest(pool: web::Data<SqlitePool>) -> Result<HttpResponse> {
    let latest = db::latest::get_latest(&pool).await?;
    Ok(HttpResponse::Ok().json(LatestResponse { latest }))
}

/// POST /register - register a new author.
pub async fn register(
    pool: web::Data<SqlitePool>,
    query: web::Query<SequenceQuery>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    db::latest::update_latest_if_present(&pool, query.latest).await?;

    if body.username.trim().is_empty() {
        return Err(AppError::BadRequest("Username is required".to_string()));
    }
    if body.email.trim().is_empty() {
        return Err(AppError::BadRequest("Email is required".to_string()));
    }
    if body.pwd.trim().is_empty() {
        return Err(AppError::BadRequest("Password is required".to_string()));
    }

    if db::authors::find_by_name(&pool, &body.username).await?.is_some() {
        return Err(AppError::BadRequest("Username already taken".to_string()));
    }

    // The simulator credential set is separate from author records, so the
    // password is validated but not stored.
    match db::authors::create(&pool, &body.username, &body.email).await {
        Ok(_) => Ok(HttpResponse::NoContent().finish()),
        // Lost a race against a concurrent registration of the same name.
        Err(AppError::Conflict(msg)) => Err(AppError::BadRequest(msg)),
        Err(err) => Err(err),
    }
}

/// POST /msgs/{username} - post a cheep as the given author.
pub async fn post_message(
    pool: web::Data<SqlitePool>,
    username: web::Path<String>,
    query: web::Query<SequenceQuery>,
    body: web::Json<MessageRequest>,
) -> Result<HttpResponse> {
    db::latest::update_latest_if_present(&pool, query.latest).await?;

    let author = db::authors::find_by_name(&pool, &username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", username)))?;

    if body.content.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Message content is required".to_string(),
        ));
    }
    if body.content.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(AppError::BadRequest(
            "Message content must be 160 characters or less".to_string(),
        ));
    }

    db::cheeps::create(&pool, author.author_id, &body.content, Utc::now()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// GET /msgs/{username} - one author's cheeps, newest-first. An unknown
/// author yields an empty array, not a 404.
pub async fn get_user_messages(
    pool: web::Data<SqlitePool>,
    username: web::Path<String>,
    query: web::Query<MessagesQuery>,
) -> Result<HttpResponse> {
    db::latest::update_latest_if_present(&pool, query.latest).await?;

    let count = query.no.unwrap_or(DEFAULT_MESSAGE_COUNT);
    let cheeps = db::cheeps::list_for_author(&pool, &username, count).await?;

    let messages: Vec<MessageResponse> = cheeps
        .into_iter()
        .map(|c| MessageResponse {
            content: c.text,
            pub_date: format_pub_date(c.created_at),
            user: c.author_name,
        })
        .collect();

    Ok(HttpResponse::Ok().json(messages))
}

/// GET /msgs - the global feed, newest-first.
pub async fn get_messages(
    pool: web::Data<SqlitePool>,
    query: web::Query<MessagesQuery>,
) -> Result<HttpResponse> {
    db::latest::update_latest_if_present(&pool, query.latest).await?;

    let count = query.no.unwrap_or(DEFAULT_MESSAGE_COUNT);
    let cheeps = db::cheeps::list_global(&pool, count).await?;

    let messages: Vec<MessageResponse> = cheeps
        .into_iter()
        .map(|c| MessageResponse {
            content: c.text,
            pub_date: format_pub_date(c.created_at),
            user: c.author_name,
        })
        .collect();

    Ok(HttpResponse::Ok().json(messages))
}

/// POST /fllws/{username} - follow and/or unfollow on behalf of an author.
///
/// A present `follow` target must resolve (404 otherwise); `unfollow` of an
/// unknown or never-followed name is a silent success. Both fields may be
/// sent in one request and are applied independently, follow first.
pub async fn follow_user(
    pool: web::Data<SqlitePool>,
    username: web::Path<String>,
    query: web::Query<SequenceQuery>,
    body: web::Json<FollowRequest>,
) -> Result<HttpResponse> {
    db::latest::update_latest_if_present(&pool, query.latest).await?;

    let author = db::authors::find_by_name(&pool, &username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", username)))?;

    if let Some(target) = body.follow.as_deref().filter(|s| !s.is_empty()) {
        let followee = db::authors::find_by_name(&pool, target)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", target)))?;

        db::follows::follow(&pool, author.author_id, followee.author_id).await?;
    }

    if let Some(target) = body.unfollow.as_deref().filter(|s| !s.is_empty()) {
        if let Some(followee) = db::authors::find_by_name(&pool, target).await? {
            db::follows::unfollow(&pool, author.author_id, followee.author_id).await?;
        }
    }

    Ok(HttpResponse::NoContent().finish())
}

/// GET /fllws/{username} - names the author follows.
pub async fn get_follows(
    pool: web::Data<SqlitePool>,
    username: web::Path<String>,
    query: web::Query<MessagesQuery>,
) -> Result<HttpResponse> {
    db::latest::update_latest_if_present(&pool, query.latest).await?;

    // `no` is accepted for wire compatibility but not applied; the reference
    // implementation returns the full list regardless.
    let _ = query.no;

    let follows = db::follows::list_following(&pool, &username).await?;

    Ok(HttpResponse::Ok().json(FollowsResponse { follows }))
}

/// Route table for the simulator API.
pub fn simulator_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/latest", web::get().to(get_latest))
        .route("/register", web::post().to(register))
        .service(
            web::resource("/msgs")
                .route(web::get().to(get_messages)),
        )
        .service(
            web::resource("/msgs/{username}")
                .route(web::get().to(get_user_messages))
                .route(web::post().to(post_message)),
        )
        .service(
            web::resource("/fllws/{username}")
                .route(web::get().to(get_follows))
                .route(web::post().to(follow_user)),
        );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn pub_date_matches_invariant_culture_shape() {
        let ts = Utc.with_ymd_and_hms(2026, 8, 28, 14, 3, 57).unwrap();
        assert_eq!(format_pub_date(ts), "08/28/2026 14:03:57");
    }
}
