pub mod auth;
pub mod pages;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the complete route tree.
///
/// ```text
/// /              timer page (public)
/// /register      form, register (public)
/// /login         form, login (public; always drops the current session)
/// /logout        logout (public)
/// /history       focus history (login required, redirects to /login)
/// /api/log       record an interval (login required, JSON 401)
/// /health        service health and applied schema version
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(pages::router())
        .merge(auth::router())
        .route("/api/log", post(handlers::intervals::log_interval))
        .route("/health", get(handlers::health::health))
}
