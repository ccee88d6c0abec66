use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pomodoro_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Renders as a plain-text body, which is what the HTML form routes return.
/// The JSON API wraps it in [`ApiError`] instead.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `pomodoro_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The login session could not be loaded or changed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Map to an HTTP status and a message safe to show the client.
    ///
    /// Internal and database errors are logged here and replaced with a
    /// generic message.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            },
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                internal()
            }
            AppError::Session(err) => {
                tracing::error!(error = %err, "Session error");
                internal()
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        }
    }
}

fn internal() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "An internal error occurred".to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.status_and_message().into_response()
    }
}

/// Error type for the JSON API: renders as `{"error": message}`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Result alias for JSON API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self(AppError::Core(err))
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self(AppError::Database(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.0.status_and_message();
        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}
