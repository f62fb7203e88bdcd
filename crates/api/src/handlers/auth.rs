//! Handlers for the session endpoints (login, token, logout, refresh).
//!
//! Login comes in two flavors sharing one code path: `POST /api/login`
//! takes an OAuth2-style form, `POST /api/token` takes plain JSON. Both
//! return the same bearer token envelope.

use axum::extract::State;
use axum::{Form, Json};
use linkvault_core::validate::validate_email;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::session;
use crate::auth::token::PublicAccessToken;
use crate::error::AppResult;
use crate::middleware::auth::{CurrentSession, ExpiredSession};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Form body for `POST /api/login` (OAuth2 password-grant shape, so the
/// email travels in the `username` field).
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// JSON body for `POST /api/token`. `username` carries the email address.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/login
///
/// Authenticate with form-encoded credentials and open a new session.
pub async fn login(
    State(state): State<AppState>,
    Form(input): Form<LoginForm>,
) -> AppResult<Json<PublicAccessToken>> {
    let token = session::login(
        &state.pool,
        &state.config.auth,
        &input.username,
        &input.password,
    )
    .await?;

    Ok(Json(token))
}

/// POST /api/token
///
/// JSON variant of login for non-form clients. The username is checked for
/// email shape before credentials are looked up.
pub async fn token(
    State(state): State<AppState>,
    Json(input): Json<Credentials>,
) -> AppResult<Json<PublicAccessToken>> {
    validate_email(&input.username)?;

    let token = session::login(
        &state.pool,
        &state.config.auth,
        &input.username,
        &input.password,
    )
    .await?;

    Ok(Json(token))
}

/// POST /api/logout
///
/// Delete the bearer token's session; the token stops working immediately.
pub async fn logout(
    State(state): State<AppState>,
    CurrentSession(current): CurrentSession,
) -> AppResult<Json<Value>> {
    session::logout(&state.pool, &current).await?;

    Ok(Json(json!({ "status": "ok" })))
}

/// POST /api/refresh-session
///
/// Exchange an expired (but still refreshable) token for a fresh session.
/// A token that has not expired yet is rejected with `NotExpiredToken`.
pub async fn refresh_session(
    State(state): State<AppState>,
    ExpiredSession(expired): ExpiredSession,
) -> AppResult<Json<PublicAccessToken>> {
    let token = session::refresh(&state.pool, &state.config.auth, &expired).await?;

    Ok(Json(token))
}
