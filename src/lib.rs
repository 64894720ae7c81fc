/// Chirp Simulator API
///
/// Serves the MiniTwit simulator compatibility endpoints for the Chirp
/// platform. The simulator is an external harness that drives this API to
/// verify protocol conformance: registration, message posting/reading,
/// follow management, and a command-sequence marker it polls via `/latest`.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers for the simulator routes
/// - `models`: Row types shared between the database layer and handlers
/// - `db`: Database access layer (authors, cheeps, follows, sequence marker)
/// - `middleware`: Basic-Auth gate protecting the simulator routes
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;

pub use config::Config;
pub use error::{AppError, Result};
