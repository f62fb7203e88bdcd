//! Route definitions for the `/bookmarks` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::bookmarks;
use crate::state::AppState;

/// Routes mounted at `/bookmarks`. All of them require auth.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /stats   -> stats
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(bookmarks::list).post(bookmarks::create))
        .route("/stats", get(bookmarks::stats))
        .route("/{id}", delete(bookmarks::delete))
}
