//! Handlers for the `/bookmarks` resource.
//!
//! All bookmark endpoints require a live session. Creation only registers
//! the URL; metadata arrives later when the refresh job fetches it.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use linkvault_core::error::CoreError;
use linkvault_core::hashing::url_hash;
use linkvault_core::pagination::{self, Pagination};
use linkvault_core::types::{DbId, Timestamp};
use linkvault_core::validate::validate_url;
use linkvault_db::models::bookmark::{Bookmark, BookmarkOrder, BookmarkStats, FetchState};
use linkvault_db::repositories::BookmarkRepo;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::auth::CurrentSession;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /api/bookmarks`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Filter by fetch state (`fetched` or `pending`); omitted means both.
    pub state: Option<FetchState>,
    /// Sort order: `date`, `-date` (default) or `random`.
    pub order_by: Option<BookmarkOrder>,
    pub current_page: Option<i64>,
    pub items_per_page: Option<i64>,
}

/// Request body for `POST /api/bookmarks`.
#[derive(Debug, Deserialize)]
pub struct CreateBookmarkRequest {
    pub url: String,
}

/// Public view of a bookmark row.
#[derive(Debug, Serialize)]
pub struct BookmarkItem {
    pub id: DbId,
    pub url: String,
    pub title: String,
    pub source: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub last_fetch_at: Option<Timestamp>,
    pub is_active: bool,
    pub is_read: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Bookmark> for BookmarkItem {
    fn from(bookmark: Bookmark) -> Self {
        // A bookmark has no title until its first successful fetch; the raw
        // URL stands in for it.
        let title = match bookmark.title {
            Some(title) if !title.is_empty() => title,
            _ => bookmark.url.clone(),
        };

        BookmarkItem {
            id: bookmark.id,
            url: bookmark.url,
            title,
            source: bookmark.source,
            author: bookmark.author,
            description: bookmark.description,
            image_url: bookmark.image_url,
            last_fetch_at: bookmark.last_fetch_at,
            is_active: bookmark.is_active,
            is_read: bookmark.is_read,
            created_at: bookmark.created_at,
            updated_at: bookmark.updated_at,
        }
    }
}

/// Response body for `GET /api/bookmarks`.
#[derive(Debug, Serialize)]
pub struct BookmarkListResponse {
    pub items: Vec<BookmarkItem>,
    pub pagination: Pagination,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/bookmarks
///
/// Paginated listing, filterable by fetch state and orderable by fetch
/// date or at random.
pub async fn list(
    State(state): State<AppState>,
    _session: CurrentSession,
    Query(params): Query<ListParams>,
) -> AppResult<Json<BookmarkListResponse>> {
    let (current_page, items_per_page) =
        pagination::normalize_page_params(params.current_page, params.items_per_page);
    let order = params.order_by.unwrap_or_default();
    let offset = pagination::page_offset(current_page, items_per_page);

    let total = BookmarkRepo::count(&state.pool, params.state).await?;
    let rows =
        BookmarkRepo::list(&state.pool, params.state, order, items_per_page, offset).await?;

    Ok(Json(BookmarkListResponse {
        items: rows.into_iter().map(BookmarkItem::from).collect(),
        pagination: pagination::paginate(total, current_page, items_per_page),
    }))
}

/// GET /api/bookmarks/stats
///
/// Aggregate counts over the whole collection.
pub async fn stats(
    State(state): State<AppState>,
    _session: CurrentSession,
) -> AppResult<Json<BookmarkStats>> {
    let stats = BookmarkRepo::stats(&state.pool).await?;

    Ok(Json(stats))
}

/// POST /api/bookmarks
///
/// Register a URL for later fetching. Re-posting a known URL returns the
/// existing row untouched. Responds 201 with the stored record.
pub async fn create(
    State(state): State<AppState>,
    _session: CurrentSession,
    Json(input): Json<CreateBookmarkRequest>,
) -> AppResult<(StatusCode, Json<BookmarkItem>)> {
    validate_url(&input.url)?;

    let hash = url_hash(&input.url);
    let placeholder = state.config.scrape.placeholder_image_url();
    let bookmark =
        BookmarkRepo::create_unfetched(&state.pool, &input.url, &hash, &placeholder).await?;

    Ok((StatusCode::CREATED, Json(bookmark.into())))
}

/// DELETE /api/bookmarks/{id}
///
/// Remove a bookmark. Deleting an unknown id fails with `BookmarkNotFound`.
pub async fn delete(
    State(state): State<AppState>,
    _session: CurrentSession,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = BookmarkRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(CoreError::BookmarkNotFound.into());
    }

    Ok(StatusCode::NO_CONTENT)
}
