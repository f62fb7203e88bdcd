pub mod auth;
pub mod bookmarks;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /login              login, form-encoded (public)
/// /token              login, JSON (public)
/// /logout             logout (requires auth)
/// /refresh-session    refresh an expired session (expired token required)
///
/// /bookmarks          list (GET), create (POST)
/// /bookmarks/stats    aggregate counts (GET)
/// /bookmarks/{id}     delete (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Session endpoints sit directly under /api.
        .merge(auth::router())
        // Bookmark collection, stats and deletion.
        .nest("/bookmarks", bookmarks::router())
}
