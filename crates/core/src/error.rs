//! Closed domain error set.
//!
//! Every failure the service reports to a client is one of these variants.
//! The API layer owns the mapping to HTTP statuses and numeric error codes;
//! this enum only names the condition.

use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Unknown email, inactive account, or password mismatch. Deliberately
    /// indistinguishable from the outside.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The account is locked out after too many failed logins. Raised even
    /// when the presented password is correct.
    #[error("Reached max failed login attempts")]
    MaxFailedAttempts,

    /// A freshly generated session token collided with an existing one.
    #[error("Session token already registered")]
    DuplicatedToken,

    #[error("Email address already in use")]
    EmailAlreadyUsed,

    /// The access token was valid but is past its expiry.
    #[error("Token has expired")]
    ExpiredToken,

    /// A refresh was attempted while the access token is still valid.
    #[error("Token has not expired yet")]
    NotExpiredToken,

    /// Malformed/forged token, or a token whose session no longer exists,
    /// or a session past its refresh window.
    #[error("Token is invalid")]
    TokenError,

    #[error("Bookmark doesn't exist")]
    BookmarkNotFound,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
