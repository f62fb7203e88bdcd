//! Bearer-token extractors.
//!
//! Handlers declare their authentication requirement by taking one of the
//! extractors below as an argument. [`CurrentSession`] demands a live
//! session; [`ExpiredSession`] demands one past its access expiry and is
//! only of use to the refresh endpoint.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use linkvault_core::error::CoreError;
use linkvault_db::models::session::Session;

use crate::auth::session;
use crate::error::AppError;
use crate::state::AppState;

/// The live session behind the request's bearer token.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let session = session::validate(&state.pool, &state.config.auth, token).await?;
        Ok(CurrentSession(session))
    }
}

/// The expired-but-present session behind the request's bearer token.
#[derive(Debug, Clone)]
pub struct ExpiredSession(pub Session);

impl FromRequestParts<AppState> for ExpiredSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let session = session::validate_expired(&state.pool, &state.config.auth, token).await?;
        Ok(ExpiredSession(session))
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    parts
        .headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Core(CoreError::TokenError))
}
