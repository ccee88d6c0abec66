//! HTML views.
//!
//! Templates are compiled in with `include_str!` and filled by placeholder
//! substitution. Every substituted value is numeric or a timestamp, so no
//! escaping is applied.

use axum::response::Html;
use pomodoro_core::history::FocusSummary;
use pomodoro_core::types::DbId;
use pomodoro_db::models::interval::FocusRow;

const LAYOUT: &str = include_str!("../templates/layout.html");
const TIMER: &str = include_str!("../templates/timer.html");
const LOGIN: &str = include_str!("../templates/login.html");
const REGISTER: &str = include_str!("../templates/register.html");
const HISTORY: &str = include_str!("../templates/history.html");

const NAV_ANONYMOUS: &str = r#"<a href="/">Timer</a> <a href="/register">Register</a> <a href="/login">Log in</a>"#;
const NAV_LOGGED_IN: &str = r#"<a href="/">Timer</a> <a href="/history">History</a> <a href="/logout">Log out</a>"#;

fn page(title: &str, logged_in: bool, content: &str) -> Html<String> {
    let nav = if logged_in { NAV_LOGGED_IN } else { NAV_ANONYMOUS };
    Html(
        LAYOUT
            .replace("{{title}}", title)
            .replace("{{nav}}", nav)
            .replace("{{content}}", content),
    )
}

/// The timer page. `user_id` is empty in the markup for anonymous visitors.
pub fn timer(user_id: Option<DbId>) -> Html<String> {
    let id = user_id.map(|id| id.to_string()).unwrap_or_default();
    page("Timer", user_id.is_some(), &TIMER.replace("{{user_id}}", &id))
}

pub fn login_form() -> Html<String> {
    page("Log in", false, LOGIN)
}

pub fn register_form() -> Html<String> {
    page("Register", false, REGISTER)
}

/// The history page: summary figures plus one table row per focus interval.
pub fn history(rows: &[FocusRow], summary: &FocusSummary) -> Html<String> {
    let rows_html: String = rows
        .iter()
        .map(|row| {
            format!(
                "    <tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                row.id,
                row.duration_seconds / 60,
                row.created_at.format("%Y-%m-%d %H:%M UTC"),
            )
        })
        .collect();

    let content = HISTORY
        .replace("{{focus_count}}", &summary.focus_count.to_string())
        .replace("{{total_minutes}}", &summary.total_minutes.to_string())
        .replace("{{blocks_completed}}", &summary.blocks_completed.to_string())
        .replace("{{remainder}}", &summary.remainder.to_string())
        .replace("{{rows}}", &rows_html);

    page("History", true, &content)
}
