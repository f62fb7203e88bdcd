use std::sync::atomic::{AtomicBool, Ordering};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use linkvault_core::error::CoreError;
use serde_json::json;

/// Echo internal error details in 500 bodies. Off by default; enabled once
/// at startup for debug deployments. Full detail always goes to the log.
static DEBUG_ERRORS: AtomicBool = AtomicBool::new(false);

/// Enable or disable detail echoing for internal errors.
pub fn set_debug_errors(enabled: bool) {
    DEBUG_ERRORS.store(enabled, Ordering::Relaxed);
}

fn debug_errors() -> bool {
    DEBUG_ERRORS.load(Ordering::Relaxed)
}

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the `{code, detail}` JSON error
/// body with the numeric code assigned to each condition:
///
/// | Condition            | Code | Status |
/// |----------------------|------|--------|
/// | internal             | 1001 | 500    |
/// | bad request          | 1002 | 400    |
/// | invalid credentials  | 2001 | 401    |
/// | max failed attempts  | 2002 | 401    |
/// | duplicated token     | 2003 | 409    |
/// | email already used   | 2004 | 409    |
/// | expired token        | 2005 | 401    |
/// | not expired token    | 2006 | 422    |
/// | token error          | 2007 | 401    |
/// | bookmark not found   | 3001 | 422    |
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `linkvault_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, detail) = match &self {
            AppError::Core(core) => core_error_parts(core),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, 1002, msg.clone()),
            AppError::InternalError(msg) => internal_error(msg),
        };

        let body = json!({
            "code": code,
            "detail": detail,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a domain error onto its HTTP status, numeric code, and detail string.
fn core_error_parts(core: &CoreError) -> (StatusCode, u16, String) {
    match core {
        CoreError::InvalidCredentials => (StatusCode::UNAUTHORIZED, 2001, core.to_string()),
        CoreError::MaxFailedAttempts => (StatusCode::UNAUTHORIZED, 2002, core.to_string()),
        CoreError::DuplicatedToken => (StatusCode::CONFLICT, 2003, core.to_string()),
        CoreError::EmailAlreadyUsed => (StatusCode::CONFLICT, 2004, core.to_string()),
        CoreError::ExpiredToken => (StatusCode::UNAUTHORIZED, 2005, core.to_string()),
        CoreError::NotExpiredToken => (StatusCode::UNPROCESSABLE_ENTITY, 2006, core.to_string()),
        CoreError::TokenError => (StatusCode::UNAUTHORIZED, 2007, core.to_string()),
        CoreError::BookmarkNotFound => (StatusCode::UNPROCESSABLE_ENTITY, 3001, core.to_string()),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, 1002, msg.clone()),
        CoreError::Internal(msg) => internal_error(msg),
    }
}

/// Classify a sqlx error into an HTTP status, numeric code, and detail.
///
/// The two unique constraints with domain meaning are translated to their
/// conflict errors; everything else is an internal error.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, u16, String) {
    match linkvault_db::unique_constraint(err) {
        Some("uq_sessions_token") => core_error_parts(&CoreError::DuplicatedToken),
        Some("uq_users_email") => core_error_parts(&CoreError::EmailAlreadyUsed),
        _ => internal_error(&err.to_string()),
    }
}

fn internal_error(detail: &str) -> (StatusCode, u16, String) {
    tracing::error!(error = %detail, "Internal error");
    let body = if debug_errors() {
        detail.to_string()
    } else {
        "An internal error occurred".to_string()
    };
    (StatusCode::INTERNAL_SERVER_ERROR, 1001, body)
}
