use std::path::PathBuf;

use crate::auth::session::SessionConfig;

/// Database file used when `DATABASE_PATH` is unset.
pub const DEFAULT_DATABASE_PATH: &str = "pomodoro.db";

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In production,
/// override via environment variables (at minimum `SESSION_SECRET`).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// SQLite database file (default: `pomodoro.db`).
    pub database_path: PathBuf,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Session cookie settings and signing secret.
    pub session: SessionConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default         |
    /// |------------------------|-----------------|
    /// | `HOST`                 | `0.0.0.0`       |
    /// | `PORT`                 | `5000`          |
    /// | `DATABASE_PATH`        | `pomodoro.db`   |
    /// | `REQUEST_TIMEOUT_SECS` | `30`            |
    ///
    /// See [`SessionConfig::from_env`] for the session variables.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let database_path = std::env::var("DATABASE_PATH")
            .unwrap_or_else(|_| DEFAULT_DATABASE_PATH.into())
            .into();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let session = SessionConfig::from_env();

        Self {
            host,
            port,
            database_path,
            request_timeout_secs,
            session,
        }
    }
}
