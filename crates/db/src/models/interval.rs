//! Logged interval model (`sessions` table) and DTOs.

use pomodoro_core::interval::IntervalKind;
use pomodoro_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full row from the `sessions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct IntervalRecord {
    pub id: DbId,
    pub user_id: DbId,
    pub session_type: String,
    pub duration_seconds: i64,
    pub created_at: Timestamp,
}

/// A focus interval as listed on the history page.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FocusRow {
    pub id: DbId,
    pub duration_seconds: i64,
    pub created_at: Timestamp,
}

/// Count and accumulated seconds over a user's focus intervals.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct FocusTotals {
    pub focus_count: i64,
    pub total_seconds: i64,
}

/// DTO for recording a completed interval.
#[derive(Debug)]
pub struct CreateInterval {
    pub user_id: DbId,
    pub kind: IntervalKind,
    pub duration_seconds: i64,
}
