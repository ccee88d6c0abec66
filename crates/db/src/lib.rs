//! SQLite persistence for users and logged intervals.
//!
//! Each repository is a zero-sized struct whose methods take `&DbPool`.
//! Connections are checked out of the pool per statement and returned on
//! every exit path.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::SqlitePool;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Open (or create) the database file at `path`.
///
/// Every pooled connection has foreign keys enabled so that deleting a user
/// cascades to their intervals.
pub async fn create_pool(path: &Path) -> Result<DbPool, sqlx::Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::info!(path = %path.display(), "Database opened");
    Ok(pool)
}

/// Open a private in-memory database.
///
/// The pool holds exactly one connection that is never recycled, since an
/// in-memory SQLite database lives only as long as its connection.
pub async fn create_in_memory_pool() -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

/// Apply all pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Version of the newest migration compiled into this binary.
pub fn expected_schema_version() -> Option<i64> {
    MIGRATOR.iter().map(|m| m.version).max()
}

/// Version of the newest migration successfully applied to the database,
/// or `None` on a database that was never migrated.
///
/// Doubles as the reachability check: any error means the database could
/// not be queried.
pub async fn applied_schema_version(pool: &DbPool) -> Result<Option<i64>, sqlx::Error> {
    let tracked: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = '_sqlx_migrations'",
    )
    .fetch_one(pool)
    .await?;
    if tracked == 0 {
        return Ok(None);
    }

    sqlx::query_scalar("SELECT MAX(version) FROM _sqlx_migrations WHERE success = 1")
        .fetch_one(pool)
        .await
}

/// Whether `err` is a UNIQUE constraint violation reported by SQLite.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
