/// Configuration management for the simulator API
///
/// This module handles loading and managing configuration from environment
/// variables.
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Simulator Basic-Auth credentials
    pub simulator: SimulatorAuthConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (dev, staging, prod)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
}

/// Credentials the simulator harness authenticates with.
///
/// Injected into the auth middleware at construction rather than compiled in,
/// so deployments can rotate the shared secret without a rebuild.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorAuthConfig {
    pub username: String,
    pub password: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: std::env::var("CHIRP_API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("CHIRP_API_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite://chirp.db".to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(10),
            },
            simulator: {
                let password = std::env::var("SIMULATOR_PASSWORD")
                    .unwrap_or_else(|_| "super_safe!".to_string());
                if app_env.eq_ignore_ascii_case("production") && password == "super_safe!" {
                    return Err(
                        "SIMULATOR_PASSWORD must be set to a non-default value in production"
                            .to_string(),
                    );
                }

                SimulatorAuthConfig {
                    username: std::env::var("SIMULATOR_USERNAME")
                        .unwrap_or_else(|_| "simulator".to_string()),
                    password,
                }
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_falls_back_to_defaults() {
        // Scope out anything the surrounding environment may carry so the
        // assertions see the actual fallbacks.
        for key in [
            "APP_ENV",
            "CHIRP_API_HOST",
            "CHIRP_API_PORT",
            "DATABASE_URL",
            "DATABASE_MAX_CONNECTIONS",
            "SIMULATOR_USERNAME",
            "SIMULATOR_PASSWORD",
        ] {
            std::env::remove_var(key);
        }

        let config = Config::from_env().expect("default config loads");
        assert_eq!(config.app.env, "development");
        assert_eq!(config.simulator.username, "simulator");
        assert_eq!(config.simulator.password, "super_safe!");
        assert_eq!(config.database.max_connections, 10);
    }
}
