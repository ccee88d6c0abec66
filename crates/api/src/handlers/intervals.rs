//! Handler for the JSON interval-logging endpoint.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use pomodoro_core::interval::IntervalEntry;
use pomodoro_db::models::interval::CreateInterval;
use pomodoro_db::repositories::IntervalRepo;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiResult;
use crate::middleware::auth::ApiUser;
use crate::state::AppState;

/// Acknowledgement body: `{"status": "ok"}`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// POST /api/log
///
/// Records one completed interval for the logged-in user. The body is read
/// leniently: a missing or malformed JSON body counts as `{}`, so both
/// fields take their defaults (`focus`, 1500 seconds).
pub async fn log_interval(
    State(state): State<AppState>,
    user: ApiUser,
    body: Bytes,
) -> ApiResult<Json<StatusResponse>> {
    let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    tracing::info!(user_id = user.user_id, %payload, "Interval log received");

    let entry = IntervalEntry::from_payload(&payload)?;

    let record = IntervalRepo::create(
        &state.pool,
        &CreateInterval {
            user_id: user.user_id,
            kind: entry.kind,
            duration_seconds: entry.duration_secs,
        },
    )
    .await?;

    tracing::debug!(
        interval_id = record.id,
        kind = %entry.kind,
        duration_secs = entry.duration_secs,
        "Interval recorded"
    );

    Ok(Json(StatusResponse { status: "ok" }))
}
