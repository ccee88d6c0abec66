//! Login-session extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use pomodoro_core::error::CoreError;
use pomodoro_core::types::DbId;
use tower_sessions::Session;

use crate::auth::session;
use crate::error::{ApiError, AppError, AppResult};
use crate::state::AppState;

/// Path unauthenticated page requests are sent to.
pub const LOGIN_PATH: &str = "/login";

/// The logged-in user, if the request carries a live session.
///
/// Only rejects when the session store fails; use it on routes that render
/// for anonymous visitors too.
#[derive(Debug, Clone, Copy)]
pub struct SessionUser(pub Option<DbId>);

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        session_user_id(parts, state).await.map(SessionUser)
    }
}

/// Authenticated user for HTML page routes.
///
/// Rejects with a redirect to [`LOGIN_PATH`]:
///
/// ```ignore
/// async fn history(user: PageUser) -> AppResult<Html<String>> {
///     tracing::debug!(user_id = user.user_id, "rendering history");
///     ...
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PageUser {
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for PageUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match session_user_id(parts, state).await {
            Ok(Some(user_id)) => Ok(PageUser { user_id }),
            Ok(None) => Err(Redirect::to(LOGIN_PATH).into_response()),
            Err(err) => Err(err.into_response()),
        }
    }
}

/// Authenticated user for JSON API routes.
///
/// Rejects with `401 {"error": "login required"}`.
#[derive(Debug, Clone, Copy)]
pub struct ApiUser {
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for ApiUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        session_user_id(parts, state)
            .await?
            .map(|user_id| ApiUser { user_id })
            .ok_or_else(|| ApiError::from(CoreError::Unauthorized("login required".into())))
    }
}

/// Read the user id from the request's session.
async fn session_user_id(parts: &mut Parts, state: &AppState) -> AppResult<Option<DbId>> {
    let session = Session::from_request_parts(parts, state)
        .await
        .map_err(|(_, msg)| AppError::InternalError(format!("Session layer missing: {msg}")))?;
    Ok(session::current_user(&session).await?)
}
