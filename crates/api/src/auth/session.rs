//! Login sessions backed by `tower-sessions`.
//!
//! The browser holds a signed, opaque session id cookie. The logged-in user
//! id lives in the `tower_sessions` table of the application database, so
//! logging out deletes the record and a stale cookie stops authenticating.

use pomodoro_core::types::DbId;
use pomodoro_db::DbPool;
use sha2::{Digest, Sha512};
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::session::Error as SessionError;
use tower_sessions::service::SignedCookie;
use tower_sessions::{Session, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

/// Session key holding the logged-in user's id.
pub const USER_ID_KEY: &str = "user_id";

/// Secret used when `SESSION_SECRET` is unset. Development only.
const DEV_SESSION_SECRET: &str = "dev-secret-change-later";

/// Default cookie name.
pub const DEFAULT_COOKIE_NAME: &str = "pomodoro_session";

/// Session cookie settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Any-length secret the cookie signing key is derived from.
    pub secret: String,
    pub cookie_name: String,
    /// Adds the `Secure` attribute (default: `false`).
    pub cookie_secure: bool,
}

impl SessionConfig {
    /// Load session settings from environment variables.
    ///
    /// | Env Var                 | Default            |
    /// |-------------------------|--------------------|
    /// | `SESSION_SECRET`        | development secret |
    /// | `SESSION_COOKIE_NAME`   | `pomodoro_session` |
    /// | `SESSION_COOKIE_SECURE` | `false`            |
    pub fn from_env() -> Self {
        let secret = match std::env::var("SESSION_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("SESSION_SECRET not set, using the development secret");
                DEV_SESSION_SECRET.to_string()
            }
        };

        let cookie_name = std::env::var("SESSION_COOKIE_NAME")
            .ok()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string());

        let cookie_secure = std::env::var("SESSION_COOKIE_SECURE")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            secret,
            cookie_name,
            cookie_secure,
        }
    }

    /// The session middleware over `store`, with this config's cookie
    /// attributes (`HttpOnly; SameSite=Lax`, optionally `Secure`) and a
    /// signed session id.
    pub fn layer(&self, store: SqliteStore) -> SessionManagerLayer<SqliteStore, SignedCookie> {
        SessionManagerLayer::new(store)
            .with_name(self.cookie_name.clone())
            .with_http_only(true)
            .with_same_site(SameSite::Lax)
            .with_secure(self.cookie_secure)
            .with_signed(self.signing_key())
    }

    /// 64-byte cookie key: SHA-512 of the secret.
    fn signing_key(&self) -> Key {
        Key::from(Sha512::digest(self.secret.as_bytes()).as_slice())
    }
}

/// Create the session store over `pool`, adding its table if missing.
pub async fn prepare_store(pool: &DbPool) -> Result<SqliteStore, sqlx::Error> {
    let store = SqliteStore::new(pool.clone());
    store.migrate().await?;
    Ok(store)
}

/// The logged-in user id, if any.
pub async fn current_user(session: &Session) -> Result<Option<DbId>, SessionError> {
    session.get::<DbId>(USER_ID_KEY).await
}

/// Replace whatever the session held with a login for `user_id`.
///
/// The old record is deleted, so the response carries a fresh session id.
pub async fn log_in(session: &Session, user_id: DbId) -> Result<(), SessionError> {
    session.flush().await?;
    session.insert(USER_ID_KEY, user_id).await
}

/// Drop the session record. The middleware expires the cookie if the
/// request carried one.
pub async fn log_out(session: &Session) -> Result<(), SessionError> {
    session.flush().await
}
