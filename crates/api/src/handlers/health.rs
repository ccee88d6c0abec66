//! Liveness and schema report.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database is unreachable or behind.
    pub status: &'static str,
    pub version: &'static str,
    /// SQLite file this process opened.
    pub database: String,
    /// Newest migration applied to the database.
    pub schema_version: Option<i64>,
    /// Newest migration this binary ships.
    pub expected_schema_version: Option<i64>,
    pub db_healthy: bool,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let expected = pomodoro_db::expected_schema_version();
    let (db_healthy, schema_version) =
        match pomodoro_db::applied_schema_version(&state.pool).await {
            Ok(applied) => (true, applied),
            Err(err) => {
                tracing::warn!(error = %err, "Health check could not query the database");
                (false, None)
            }
        };

    let status = if db_healthy && schema_version == expected {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        database: state.config.database_path.display().to_string(),
        schema_version,
        expected_schema_version: expected,
        db_healthy,
    })
}
