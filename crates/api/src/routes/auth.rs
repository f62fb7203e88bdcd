//! Route definitions for the session endpoints.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes merged directly into `/api`.
///
/// ```text
/// POST /login            -> login (form)
/// POST /token            -> token (JSON)
/// POST /logout           -> logout (requires auth)
/// POST /refresh-session  -> refresh_session (requires expired token)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/token", post(auth::token))
        .route("/logout", post(auth::logout))
        .route("/refresh-session", post(auth::refresh_session))
}
