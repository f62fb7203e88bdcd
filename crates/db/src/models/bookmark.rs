//! Bookmark entity model and DTOs.

use linkvault_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full bookmark row from the `bookmarks` table.
///
/// `url_hash` is the SHA-256 digest of `url` and carries the uniqueness
/// constraint; `last_fetch_at IS NULL` marks a bookmark the extraction
/// pipeline has never processed. `source` holds the canonical string form of
/// the content-source taxonomy.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Bookmark {
    pub id: DbId,
    pub url: String,
    pub url_hash: String,
    pub title: Option<String>,
    pub source: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub last_fetch_at: Option<Timestamp>,
    pub is_active: bool,
    /// Consecutive failed fetches since the last successful one.
    pub failed_attempts: i32,
    pub is_read: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Full-row payload for the dedup upsert: everything except `id` and the
/// trigger-managed timestamps.
#[derive(Debug, Clone)]
pub struct UpsertBookmark {
    pub url: String,
    pub url_hash: String,
    pub title: Option<String>,
    pub source: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub last_fetch_at: Option<Timestamp>,
    pub is_active: bool,
    pub failed_attempts: i32,
    pub is_read: bool,
}

/// Aggregate counts for the stats endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct BookmarkStats {
    /// Active rows never fetched.
    pub pending: i64,
    pub total: i64,
    /// Rows disabled by the fetch-failure ceiling.
    pub inactive: i64,
    /// Fetched and still active: `total - pending - inactive`.
    pub available: i64,
}

/// Fetch-state filter for bookmark listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchState {
    /// Active rows with at least one completed fetch.
    Fetched,
    /// Active rows never fetched.
    Pending,
}

/// Sort order for bookmark listings. The wire values mirror the query
/// parameter grammar: `date` ascending, `-date` descending, `random`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum BookmarkOrder {
    #[serde(rename = "random")]
    Random,
    #[serde(rename = "date")]
    OldestFetched,
    #[default]
    #[serde(rename = "-date")]
    NewestFetched,
}
