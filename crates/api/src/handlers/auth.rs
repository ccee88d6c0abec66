//! Handlers for registration, login, and logout.
//!
//! Every successful registration or login starts a fresh session, and every
//! login request (including `GET /login`) first drops the current one.

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use pomodoro_core::error::CoreError;
use pomodoro_core::types::DbId;
use pomodoro_db::models::user::CreateUser;
use pomodoro_db::repositories::UserRepo;
use serde::Deserialize;
use tower_sessions::Session;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::session;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::LOGIN_PATH;
use crate::state::AppState;
use crate::views;

/// Shown for both an unknown username and a wrong password.
pub const INVALID_CREDENTIALS: &str = "invalid username and/or password";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Form body for `POST /register`. Absent fields are empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub confirmation: String,
}

/// Form body for `POST /login`. Absent fields are empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /register
pub async fn register_form() -> Html<String> {
    views::register_form()
}

/// POST /register
///
/// Checks run in order and the first failure wins: username, password,
/// confirmation. A taken username is a 400, not a server error.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    form: Result<Form<RegisterForm>, FormRejection>,
) -> AppResult<Response> {
    let input = form_or_empty(form);

    let username = input.username.trim();
    if username.is_empty() {
        return Err(AppError::BadRequest("must provide username".into()));
    }
    if input.password.is_empty() {
        return Err(AppError::BadRequest("must provide password".into()));
    }
    if input.password != input.confirmation {
        return Err(AppError::BadRequest("passwords must match".into()));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateUser {
        username: username.to_string(),
        password_hash,
    };
    let user = match UserRepo::create(&state.pool, &create).await {
        Ok(user) => user,
        Err(err) if pomodoro_db::is_unique_violation(&err) => {
            tracing::debug!(username, "Registration rejected, username taken");
            return Err(AppError::BadRequest("username already exists".into()));
        }
        Err(err) => return Err(err.into()),
    };

    session::log_in(&session, user.id).await?;
    tracing::info!(user_id = user.id, "User registered");
    Ok(Redirect::to("/").into_response())
}

/// GET /login
///
/// Drops any existing login before showing the form.
pub async fn login_form(session: Session) -> AppResult<Html<String>> {
    session::log_out(&session).await?;
    Ok(views::login_form())
}

/// POST /login
///
/// The session is dropped whatever the outcome, then re-established only on
/// success.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    form: Result<Form<LoginForm>, FormRejection>,
) -> AppResult<Response> {
    session::log_out(&session).await?;

    let input = form_or_empty(form);
    let user_id = authenticate(&state, &input).await?;

    session::log_in(&session, user_id).await?;
    tracing::info!(user_id, "User logged in");
    Ok(Redirect::to("/").into_response())
}

/// GET /logout
pub async fn logout(session: Session) -> AppResult<Redirect> {
    session::log_out(&session).await?;
    Ok(Redirect::to(LOGIN_PATH))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The submitted form, or an all-empty one when the body is missing or not
/// form-encoded, so the field checks report what is absent.
fn form_or_empty<T: Default>(form: Result<Form<T>, FormRejection>) -> T {
    match form {
        Ok(Form(input)) => input,
        Err(rejection) => {
            tracing::debug!(%rejection, "Unreadable form body, treating as empty");
            T::default()
        }
    }
}

/// Validate the form and check credentials, returning the user id.
async fn authenticate(state: &AppState, input: &LoginForm) -> AppResult<DbId> {
    let username = input.username.trim();
    if username.is_empty() {
        return Err(AppError::BadRequest("must provide username".into()));
    }
    if input.password.is_empty() {
        return Err(AppError::BadRequest("must provide password".into()));
    }

    let invalid = || AppError::Core(CoreError::Forbidden(INVALID_CREDENTIALS.into()));

    let user = UserRepo::find_by_username(&state.pool, username)
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(invalid());
    }

    Ok(user.id)
}
