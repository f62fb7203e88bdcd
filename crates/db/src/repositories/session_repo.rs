//! Repository for the `sessions` table.

use linkvault_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::session::{CreateSession, Session};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, token, is_active, created_at, updated_at";

/// Provides CRUD operations for login sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session, returning the created row.
    ///
    /// Fails with a `uq_sessions_token` unique violation if the token
    /// collides with an existing session.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (user_id, token)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(input.user_id)
            .bind(&input.token)
            .fetch_one(pool)
            .await
    }

    /// Create the session for a successful login.
    ///
    /// Inserts the session row, resets the user's failed-attempt counter,
    /// and stamps `last_login_at`, all in one transaction so a token
    /// collision cannot leave the login half-recorded.
    pub async fn create_for_login(
        pool: &PgPool,
        input: &CreateSession,
    ) -> Result<Session, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO sessions (user_id, token)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let session = sqlx::query_as::<_, Session>(&query)
            .bind(input.user_id)
            .bind(&input.token)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE users SET failed_attempts = 0, last_login_at = NOW() WHERE id = $1")
            .bind(input.user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(session)
    }

    /// Find a session by its opaque token.
    pub async fn find_by_token(pool: &PgPool, token: &str) -> Result<Option<Session>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sessions WHERE token = $1");
        sqlx::query_as::<_, Session>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// Delete a single session. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Sweep sessions created before `cutoff`. Returns the count of deleted
    /// rows.
    ///
    /// Age is the only criterion: a session past the refresh window can
    /// neither validate nor refresh, so it is dead regardless of flags.
    pub async fn delete_created_before(
        pool: &PgPool,
        cutoff: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE created_at < $1")
            .bind(cutoff)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
