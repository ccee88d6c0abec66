use axum::routing::get;
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// ```text
/// GET /         -> index
/// GET /history  -> history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index))
        .route("/history", get(pages::history))
}
