//! Session lifecycle: login, validation, refresh, logout.
//!
//! A session moves through four states by age alone: active (within the
//! access expiry), expired-but-refreshable (within the refresh window),
//! unrefreshable (past it), and gone (deleted by logout or the pruning
//! sweep). The functions here gate each transition.

use chrono::Utc;
use linkvault_core::error::CoreError;
use linkvault_core::password::verify_password;
use linkvault_db::models::session::{CreateSession, Session};
use linkvault_db::models::user::User;
use linkvault_db::repositories::{SessionRepo, UserRepo};
use linkvault_db::DbPool;

use crate::auth::token::{
    decode_token, issue_public_token, new_session_token, AuthConfig, PublicAccessToken,
};
use crate::error::{AppError, AppResult};

/// Authenticate credentials and open a new session.
///
/// Returns the signed public token for the created session.
pub async fn login(
    pool: &DbPool,
    config: &AuthConfig,
    email: &str,
    password: &str,
) -> AppResult<PublicAccessToken> {
    // 1. Resolve the account and verify the password. A mismatch is
    //    recorded on the account before this returns.
    let user = verify_credentials(pool, email, password).await?;

    // 2. Enforce the lockout threshold after verification: a correct
    //    password does not unlock an account that is already over it.
    if user.failed_attempts >= config.max_failed_logins {
        return Err(CoreError::MaxFailedAttempts.into());
    }

    // 3. Create the session, reset the counter, and stamp last_login_at in
    //    one transaction.
    let input = CreateSession {
        user_id: user.id,
        token: new_session_token(),
    };
    let session = SessionRepo::create_for_login(pool, &input).await?;

    // 4. Hand back a signed view of the new session.
    sign(&session, config)
}

/// Resolve a bearer token to its live session.
///
/// Fails with `TokenError` if the token does not decode or its subject has
/// no session row, and with `ExpiredToken` if the token is past the access
/// expiry. Expiry is checked both by the decoder and against the session
/// row; the row is authoritative.
pub async fn validate(pool: &DbPool, config: &AuthConfig, token: &str) -> AppResult<Session> {
    let claims = decode_token(token, config, true)?;

    let session = SessionRepo::find_by_token(pool, &claims.sub)
        .await?
        .ok_or(CoreError::TokenError)?;

    if session.created_at + chrono::Duration::minutes(config.access_expiry_mins) <= Utc::now() {
        return Err(CoreError::ExpiredToken.into());
    }

    Ok(session)
}

/// Resolve a bearer token to its session for the refresh flow.
///
/// The token is decoded without expiry verification, but the session must
/// genuinely be past the access expiry: refreshing a still-valid token
/// fails with `NotExpiredToken`.
pub async fn validate_expired(
    pool: &DbPool,
    config: &AuthConfig,
    token: &str,
) -> AppResult<Session> {
    let claims = decode_token(token, config, false)?;

    let session = SessionRepo::find_by_token(pool, &claims.sub)
        .await?
        .ok_or(CoreError::TokenError)?;

    if session.created_at + chrono::Duration::minutes(config.access_expiry_mins) > Utc::now() {
        return Err(CoreError::NotExpiredToken.into());
    }

    Ok(session)
}

/// Exchange an expired session for a brand-new one.
///
/// Fails with `TokenError` once the session is past the refresh window.
/// The old session row is left in place for the pruning sweep to collect.
pub async fn refresh(
    pool: &DbPool,
    config: &AuthConfig,
    session: &Session,
) -> AppResult<PublicAccessToken> {
    if session.created_at + chrono::Duration::days(config.refresh_window_days) <= Utc::now() {
        return Err(CoreError::TokenError.into());
    }

    let input = CreateSession {
        user_id: session.user_id,
        token: new_session_token(),
    };
    let new_session = SessionRepo::create(pool, &input).await?;

    sign(&new_session, config)
}

/// Delete the session outright. The bearer token dies with it.
pub async fn logout(pool: &DbPool, session: &Session) -> AppResult<()> {
    SessionRepo::delete(pool, session.id).await?;
    Ok(())
}

/// Look up the account and verify the password.
///
/// Unknown accounts, deactivated accounts, and wrong passwords all fail
/// with the same `InvalidCredentials`; a wrong password additionally
/// increments the account's failed-attempt counter before returning.
async fn verify_credentials(pool: &DbPool, email: &str, password: &str) -> AppResult<User> {
    let Some(user) = UserRepo::find_by_email(pool, email).await? else {
        return Err(CoreError::InvalidCredentials.into());
    };

    if !user.is_active {
        return Err(CoreError::InvalidCredentials.into());
    }

    let password_valid = verify_password(password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        UserRepo::increment_failed_attempts(pool, user.id).await?;
        return Err(CoreError::InvalidCredentials.into());
    }

    Ok(user)
}

fn sign(session: &Session, config: &AuthConfig) -> AppResult<PublicAccessToken> {
    issue_public_token(&session.token, config)
        .map_err(|e| AppError::InternalError(format!("Token signing error: {e}")))
}
