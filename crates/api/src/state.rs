use std::sync::Arc;

use tower_sessions_sqlx_store::SqliteStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: pomodoro_db::DbPool,
    /// Login session records, stored in the same database.
    pub session_store: SqliteStore,
    /// Server configuration, including session cookie settings.
    pub config: Arc<ServerConfig>,
}
