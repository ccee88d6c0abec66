//! Repository for the `sessions` table (logged pomodoro intervals).

use chrono::Utc;
use pomodoro_core::interval::KIND_FOCUS;
use pomodoro_core::types::DbId;

use crate::models::interval::{CreateInterval, FocusRow, FocusTotals, IntervalRecord};
use crate::DbPool;

const COLUMNS: &str = "id, user_id, session_type, duration_seconds, created_at";

/// Provides persistence operations for logged intervals.
pub struct IntervalRepo;

impl IntervalRepo {
    /// Record one completed interval stamped with the current UTC time.
    pub async fn create(
        pool: &DbPool,
        input: &CreateInterval,
    ) -> Result<IntervalRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (user_id, session_type, duration_seconds, created_at)
             VALUES (?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, IntervalRecord>(&query)
            .bind(input.user_id)
            .bind(input.kind.as_str())
            .bind(input.duration_seconds)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// The `limit` most recent focus intervals for a user, newest first.
    pub async fn recent_focus(
        pool: &DbPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<FocusRow>, sqlx::Error> {
        sqlx::query_as::<_, FocusRow>(
            "SELECT id, duration_seconds, created_at
             FROM sessions
             WHERE user_id = ? AND session_type = ?
             ORDER BY id DESC
             LIMIT ?",
        )
        .bind(user_id)
        .bind(KIND_FOCUS)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Focus-interval count and total seconds for a user (zeros when none).
    pub async fn focus_totals(pool: &DbPool, user_id: DbId) -> Result<FocusTotals, sqlx::Error> {
        sqlx::query_as::<_, FocusTotals>(
            "SELECT COUNT(*) AS focus_count,
                    COALESCE(SUM(duration_seconds), 0) AS total_seconds
             FROM sessions
             WHERE user_id = ? AND session_type = ?",
        )
        .bind(user_id)
        .bind(KIND_FOCUS)
        .fetch_one(pool)
        .await
    }
}
