//! Handlers for the HTML pages that read state (`/` and `/history`).

use axum::extract::State;
use axum::response::Html;
use pomodoro_core::history::{FocusSummary, RECENT_FOCUS_LIMIT};
use pomodoro_db::repositories::IntervalRepo;

use crate::error::AppResult;
use crate::middleware::auth::{PageUser, SessionUser};
use crate::state::AppState;
use crate::views;

/// GET /
///
/// Renders the timer for everyone; the view decides what to show based on
/// whether a user id is present.
pub async fn index(SessionUser(user_id): SessionUser) -> Html<String> {
    views::timer(user_id)
}

/// GET /history
///
/// The 50 most recent focus intervals plus block statistics.
pub async fn history(State(state): State<AppState>, user: PageUser) -> AppResult<Html<String>> {
    let rows = IntervalRepo::recent_focus(&state.pool, user.user_id, RECENT_FOCUS_LIMIT).await?;
    let totals = IntervalRepo::focus_totals(&state.pool, user.user_id).await?;
    let summary = FocusSummary::from_totals(totals.focus_count, totals.total_seconds);

    tracing::debug!(
        user_id = user.user_id,
        focus_count = summary.focus_count,
        "Rendering history"
    );

    Ok(views::history(&rows, &summary))
}
