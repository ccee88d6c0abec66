//! Repository for the `users` table.

use chrono::Utc;
use pomodoro_core::types::DbId;

use crate::models::user::{CreateUser, User};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, password_hash, created_at";

/// Provides persistence operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user stamped with the current UTC time, returning the row.
    ///
    /// A duplicate username surfaces as a unique-violation database error;
    /// see [`crate::is_unique_violation`].
    pub async fn create(pool: &DbPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, password_hash, created_at)
             VALUES (?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Find a user by exact (case-sensitive) username.
    pub async fn find_by_username(
        pool: &DbPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = ?");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a user. Their intervals are removed by `ON DELETE CASCADE`.
    ///
    /// Not reachable from any HTTP route.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
