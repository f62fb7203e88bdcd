//! Login session model and DTOs.

use linkvault_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A session row from the `sessions` table.
///
/// `token` is the opaque identifier carried as the JWT subject claim; the
/// row itself never leaves the server. Session age (`created_at`) decides
/// both access expiry and refresh eligibility.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub token: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new session.
pub struct CreateSession {
    pub user_id: DbId,
    pub token: String,
}
