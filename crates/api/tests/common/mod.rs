#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_sessions_sqlx_store::SqliteStore;

use pomodoro_api::auth::session::{self, SessionConfig, DEFAULT_COOKIE_NAME};
use pomodoro_api::config::ServerConfig;
use pomodoro_api::router::build_app_router;
use pomodoro_api::state::AppState;
use pomodoro_db::models::interval::IntervalRecord;
use pomodoro_db::repositories::UserRepo;
use pomodoro_db::DbPool;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_path: PathBuf::from(":memory:"),
        request_timeout_secs: 30,
        session: SessionConfig {
            secret: "integration-test-secret".to_string(),
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            cookie_secure: false,
        },
    }
}

/// Open a migrated in-memory database, session table included.
pub async fn test_pool() -> DbPool {
    let pool = pomodoro_db::create_in_memory_pool()
        .await
        .expect("in-memory pool should open");
    pomodoro_db::run_migrations(&pool)
        .await
        .expect("migrations should apply");
    session::prepare_store(&pool)
        .await
        .expect("session store should migrate");
    pool
}

/// Build the full application router (same middleware stack as production)
/// over the given pool.
pub fn build_test_app(pool: DbPool) -> Router {
    let state = AppState {
        session_store: SqliteStore::new(pool.clone()),
        pool,
        config: Arc::new(test_config()),
    };
    build_app_router(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

fn with_cookie(
    builder: axum::http::request::Builder,
    cookie: Option<&str>,
) -> axum::http::request::Builder {
    match cookie {
        Some(cookie) => builder.header(COOKIE, cookie),
        None => builder,
    }
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    get_with_cookie(app, uri, None).await
}

pub async fn get_with_cookie(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let request = with_cookie(Request::builder().uri(uri), cookie)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// POST an `application/x-www-form-urlencoded` body built from `fields`.
pub async fn post_form(
    app: &Router,
    uri: &str,
    fields: &[(&str, &str)],
    cookie: Option<&str>,
) -> Response<Body> {
    let body = serde_urlencoded::to_string(fields).unwrap();
    let request = with_cookie(Request::builder().method("POST").uri(uri), cookie)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// POST with no body and no `Content-Type`.
pub async fn post_empty(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let request = with_cookie(Request::builder().method("POST").uri(uri), cookie)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// POST a raw body with `Content-Type: application/json`.
pub async fn post_json_raw(
    app: &Router,
    uri: &str,
    body: impl Into<Body>,
    cookie: Option<&str>,
) -> Response<Body> {
    let request = with_cookie(Request::builder().method("POST").uri(uri), cookie)
        .header(CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
    cookie: Option<&str>,
) -> Response<Body> {
    post_json_raw(app, uri, body.to_string(), cookie).await
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response.headers().get(LOCATION).and_then(|v| v.to_str().ok())
}

/// The raw `Set-Cookie` header, if any.
pub fn set_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// The `name=value` pair to send back, if the response issued a login.
///
/// Returns `None` when no cookie was set or when it was cleared.
pub fn login_cookie(response: &Response<Body>) -> Option<String> {
    let header = set_cookie(response)?;
    let pair = header.split(';').next()?.trim().to_string();
    let (_, value) = pair.split_once('=')?;
    (!value.is_empty()).then_some(pair)
}

/// Whether the response tells the browser to drop the session cookie.
pub fn clears_cookie(response: &Response<Body>) -> bool {
    set_cookie(response).is_some_and(|c| c.starts_with(&format!("{DEFAULT_COOKIE_NAME}=;")))
}

/// Whether `cookie` still authenticates (history renders instead of
/// redirecting to the login page).
pub async fn cookie_is_live(app: &Router, cookie: &str) -> bool {
    let response = get_with_cookie(app, "/history", Some(cookie)).await;
    response.status() == axum::http::StatusCode::OK
}

// ---------------------------------------------------------------------------
// Database helpers
// ---------------------------------------------------------------------------

pub async fn user_id(pool: &DbPool, username: &str) -> i64 {
    UserRepo::find_by_username(pool, username)
        .await
        .unwrap()
        .expect("user should exist")
        .id
}

pub async fn count_users(pool: &DbPool, username: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
        .bind(username)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Every interval for a user, newest first.
pub async fn intervals_for(pool: &DbPool, user_id: i64) -> Vec<IntervalRecord> {
    sqlx::query_as(
        "SELECT id, user_id, session_type, duration_seconds, created_at
         FROM sessions WHERE user_id = ? ORDER BY id DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Flows
// ---------------------------------------------------------------------------

/// Register a user through the HTTP API and return the session cookie pair.
pub async fn register(app: &Router, username: &str, password: &str) -> String {
    let response = post_form(
        app,
        "/register",
        &[
            ("username", username),
            ("password", password),
            ("confirmation", password),
        ],
        None,
    )
    .await;
    assert!(
        response.status().is_redirection(),
        "registration should redirect, got {}",
        response.status()
    );
    login_cookie(&response).expect("registration should set a session cookie")
}
