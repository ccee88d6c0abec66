//! Focus-history aggregation.
//!
//! A "block" is a run of [`FOCUS_INTERVALS_PER_BLOCK`] focus intervals. Block
//! counts are derived purely from the total number of focus intervals.

use serde::Serialize;

/// Focus intervals that make up one completed block.
pub const FOCUS_INTERVALS_PER_BLOCK: i64 = 4;

/// Number of recent focus intervals shown on the history page.
pub const RECENT_FOCUS_LIMIT: i64 = 50;

/// Aggregate statistics over a user's focus intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FocusSummary {
    pub focus_count: i64,
    pub total_minutes: i64,
    pub blocks_completed: i64,
    pub remainder: i64,
}

impl FocusSummary {
    /// Derive the summary from the raw count and accumulated seconds.
    pub fn from_totals(focus_count: i64, total_seconds: i64) -> Self {
        Self {
            focus_count,
            total_minutes: total_seconds / 60,
            blocks_completed: focus_count / FOCUS_INTERVALS_PER_BLOCK,
            remainder: focus_count % FOCUS_INTERVALS_PER_BLOCK,
        }
    }
}
