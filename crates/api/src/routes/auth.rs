//! Route definitions for registration, login, and logout.

use axum::routing::get;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// ```text
/// GET  /register  -> register_form
/// POST /register  -> register
/// GET  /login     -> login_form
/// POST /login     -> login
/// GET  /logout    -> logout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", get(auth::register_form).post(auth::register))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", get(auth::logout))
}
