//! Repository for the `bookmarks` table.

use linkvault_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::bookmark::{
    Bookmark, BookmarkOrder, BookmarkStats, FetchState, UpsertBookmark,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, url, url_hash, title, source, author, description, image_url, \
                        last_fetch_at, is_active, failed_attempts, is_read, created_at, updated_at";

/// Provides CRUD and batch-selection operations for bookmarks.
pub struct BookmarkRepo;

impl BookmarkRepo {
    /// Insert-or-replace keyed on `url_hash`.
    ///
    /// On conflict every field except `id` is overwritten by the incoming
    /// row, so a re-fetch fully supersedes older extraction results.
    pub async fn upsert(pool: &PgPool, input: &UpsertBookmark) -> Result<Bookmark, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookmarks (url, url_hash, title, source, author, description, \
                                    image_url, last_fetch_at, is_active, failed_attempts, is_read) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             ON CONFLICT (url_hash) DO UPDATE SET \
                url = EXCLUDED.url, \
                title = EXCLUDED.title, \
                source = EXCLUDED.source, \
                author = EXCLUDED.author, \
                description = EXCLUDED.description, \
                image_url = EXCLUDED.image_url, \
                last_fetch_at = EXCLUDED.last_fetch_at, \
                is_active = EXCLUDED.is_active, \
                failed_attempts = EXCLUDED.failed_attempts, \
                is_read = EXCLUDED.is_read \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bookmark>(&query)
            .bind(&input.url)
            .bind(&input.url_hash)
            .bind(&input.title)
            .bind(&input.source)
            .bind(&input.author)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(input.last_fetch_at)
            .bind(input.is_active)
            .bind(input.failed_attempts)
            .bind(input.is_read)
            .fetch_one(pool)
            .await
    }

    /// Atomically record one failed fetch attempt.
    ///
    /// Creates the row on a first-ever failure (with the given fallback
    /// image), otherwise increments the counter in place, leaving all
    /// extracted fields untouched. A row whose counter reaches
    /// `max_failed_attempts` is deactivated; deactivation is never undone
    /// here.
    pub async fn record_failure(
        pool: &PgPool,
        url: &str,
        url_hash: &str,
        image_url: &str,
        max_failed_attempts: i32,
    ) -> Result<Bookmark, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookmarks (url, url_hash, image_url, last_fetch_at, failed_attempts, is_active) \
             VALUES ($1, $2, $3, NOW(), 1, 1 < $4) \
             ON CONFLICT (url_hash) DO UPDATE SET \
                failed_attempts = bookmarks.failed_attempts + 1, \
                last_fetch_at = NOW(), \
                is_active = bookmarks.is_active AND bookmarks.failed_attempts + 1 < $4 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bookmark>(&query)
            .bind(url)
            .bind(url_hash)
            .bind(image_url)
            .bind(max_failed_attempts)
            .fetch_one(pool)
            .await
    }

    /// Insert a never-fetched bookmark; if the URL is already known, the
    /// existing row is returned untouched.
    pub async fn create_unfetched(
        pool: &PgPool,
        url: &str,
        url_hash: &str,
        image_url: &str,
    ) -> Result<Bookmark, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookmarks (url, url_hash, image_url) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (url_hash) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, Bookmark>(&query)
            .bind(url)
            .bind(url_hash)
            .bind(image_url)
            .fetch_optional(pool)
            .await?;

        match created {
            Some(bookmark) => Ok(bookmark),
            // Conflict: the row already existed, hand it back as-is.
            None => {
                let query = format!("SELECT {COLUMNS} FROM bookmarks WHERE url_hash = $1");
                sqlx::query_as::<_, Bookmark>(&query)
                    .bind(url_hash)
                    .fetch_one(pool)
                    .await
            }
        }
    }

    /// Find a bookmark by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Bookmark>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookmarks WHERE id = $1");
        sqlx::query_as::<_, Bookmark>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a bookmark by its URL digest.
    pub async fn find_by_url_hash(
        pool: &PgPool,
        url_hash: &str,
    ) -> Result<Option<Bookmark>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookmarks WHERE url_hash = $1");
        sqlx::query_as::<_, Bookmark>(&query)
            .bind(url_hash)
            .fetch_optional(pool)
            .await
    }

    /// One page of bookmarks for the list endpoint.
    pub async fn list(
        pool: &PgPool,
        state: Option<FetchState>,
        order: BookmarkOrder,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Bookmark>, sqlx::Error> {
        let where_clause = state_clause(state);
        let order_clause = order_clause(order);
        let query = format!(
            "SELECT {COLUMNS} FROM bookmarks {where_clause} {order_clause} LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Bookmark>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count bookmarks matching the given state filter (for pagination).
    pub async fn count(pool: &PgPool, state: Option<FetchState>) -> Result<i64, sqlx::Error> {
        let where_clause = state_clause(state);
        let query = format!("SELECT COUNT(*) FROM bookmarks {where_clause}");
        sqlx::query_scalar::<_, i64>(&query).fetch_one(pool).await
    }

    /// Aggregate collection counts.
    pub async fn stats(pool: &PgPool) -> Result<BookmarkStats, sqlx::Error> {
        let (total, pending, inactive): (i64, i64, i64) = sqlx::query_as(
            "SELECT \
                COUNT(*) AS total, \
                COUNT(*) FILTER (WHERE last_fetch_at IS NULL AND is_active = true) AS pending, \
                COUNT(*) FILTER (WHERE is_active = false) AS inactive \
             FROM bookmarks",
        )
        .fetch_one(pool)
        .await?;

        Ok(BookmarkStats {
            pending,
            total,
            inactive,
            available: total - pending - inactive,
        })
    }

    /// Active bookmarks due for a (re-)fetch: never fetched, or last fetched
    /// at or before `older_than`. Never-fetched rows come first, then the
    /// stalest, so the batch rotates fairly.
    pub async fn list_refresh_candidates(
        pool: &PgPool,
        older_than: Timestamp,
        limit: i64,
    ) -> Result<Vec<Bookmark>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookmarks \
             WHERE is_active = true \
               AND (last_fetch_at IS NULL OR last_fetch_at <= $1) \
             ORDER BY last_fetch_at ASC NULLS FIRST, id ASC \
             LIMIT $2"
        );
        sqlx::query_as::<_, Bookmark>(&query)
            .bind(older_than)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Delete a bookmark. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// WHERE fragment for a fetch-state filter. Empty when unfiltered.
fn state_clause(state: Option<FetchState>) -> &'static str {
    match state {
        None => "",
        Some(FetchState::Fetched) => "WHERE last_fetch_at IS NOT NULL AND is_active = true",
        Some(FetchState::Pending) => "WHERE last_fetch_at IS NULL AND is_active = true",
    }
}

/// ORDER BY fragment for a listing order. Ids break ties so pages are stable.
fn order_clause(order: BookmarkOrder) -> &'static str {
    match order {
        BookmarkOrder::Random => "ORDER BY RANDOM()",
        BookmarkOrder::OldestFetched => "ORDER BY last_fetch_at ASC NULLS FIRST, id ASC",
        BookmarkOrder::NewestFetched => "ORDER BY last_fetch_at DESC NULLS LAST, id DESC",
    }
}
