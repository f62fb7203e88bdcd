//! Public-token codec and auth configuration.
//!
//! Clients never see session tokens directly. They get a signed, time-bound
//! JWT whose subject claim IS the session token; decoding the JWT recovers
//! the subject, which is then looked up in the sessions table. The JWT
//! itself is stateless and never persisted.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use linkvault_core::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default access-token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 30;
/// Default refresh window in days.
const DEFAULT_REFRESH_WINDOW_DAYS: i64 = 30;
/// Default session retention in days for the pruning sweep.
const DEFAULT_SESSION_RETENTION_DAYS: i64 = 30;
/// Default failed-login ceiling before lockout.
const DEFAULT_MAX_FAILED_LOGINS: i32 = 5;

/// JWT claims embedded in every public access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the opaque session token this JWT stands for.
    pub sub: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Token signing and session lifecycle configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Symmetric secret used to sign and verify tokens.
    pub secret: String,
    /// Signing algorithm (default: HS256).
    pub algorithm: Algorithm,
    /// Access-token lifetime in minutes, measured from session creation.
    pub access_expiry_mins: i64,
    /// Days after session creation during which an expired token can still
    /// be refreshed.
    pub refresh_window_days: i64,
    /// Sessions older than this many days are removed by the pruning sweep.
    pub session_retention_days: i64,
    /// Consecutive failed logins after which an account is locked out.
    pub max_failed_logins: i32,
}

impl AuthConfig {
    /// Load auth configuration from environment variables.
    ///
    /// | Env Var                           | Required | Default |
    /// |-----------------------------------|----------|---------|
    /// | `TOKEN_SECRET_KEY`                | **yes**  | --      |
    /// | `TOKEN_ALGORITHM`                 | no       | `HS256` |
    /// | `ACCESS_TOKEN_EXPIRE_MINUTES`     | no       | `30`    |
    /// | `MAX_REFRESHABLE_TOKEN_DAYS`      | no       | `30`    |
    /// | `REMOVE_SESSIONS_OLDER_THAN_DAYS` | no       | `30`    |
    /// | `MAX_FAILED_LOGIN_ATTEMPTS`       | no       | `5`     |
    ///
    /// # Panics
    ///
    /// Panics if `TOKEN_SECRET_KEY` is missing or empty, if a value does not
    /// parse, or if the configured windows are inconsistent (the access
    /// expiry must fit inside the refresh window, and pruning must not
    /// remove sessions that are still refreshable).
    pub fn from_env() -> Self {
        let secret = std::env::var("TOKEN_SECRET_KEY")
            .expect("TOKEN_SECRET_KEY must be set in the environment");
        assert!(!secret.is_empty(), "TOKEN_SECRET_KEY must not be empty");

        let algorithm: Algorithm = std::env::var("TOKEN_ALGORITHM")
            .unwrap_or_else(|_| "HS256".into())
            .parse()
            .expect("TOKEN_ALGORITHM must be a valid JWT algorithm");

        let access_expiry_mins: i64 = std::env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("ACCESS_TOKEN_EXPIRE_MINUTES must be a valid i64");

        let refresh_window_days: i64 = std::env::var("MAX_REFRESHABLE_TOKEN_DAYS")
            .unwrap_or_else(|_| DEFAULT_REFRESH_WINDOW_DAYS.to_string())
            .parse()
            .expect("MAX_REFRESHABLE_TOKEN_DAYS must be a valid i64");

        let session_retention_days: i64 = std::env::var("REMOVE_SESSIONS_OLDER_THAN_DAYS")
            .unwrap_or_else(|_| DEFAULT_SESSION_RETENTION_DAYS.to_string())
            .parse()
            .expect("REMOVE_SESSIONS_OLDER_THAN_DAYS must be a valid i64");

        let max_failed_logins: i32 = std::env::var("MAX_FAILED_LOGIN_ATTEMPTS")
            .unwrap_or_else(|_| DEFAULT_MAX_FAILED_LOGINS.to_string())
            .parse()
            .expect("MAX_FAILED_LOGIN_ATTEMPTS must be a valid i32");

        assert!(
            access_expiry_mins <= refresh_window_days * 24 * 60,
            "ACCESS_TOKEN_EXPIRE_MINUTES must not exceed the MAX_REFRESHABLE_TOKEN_DAYS window"
        );
        assert!(
            session_retention_days >= refresh_window_days,
            "REMOVE_SESSIONS_OLDER_THAN_DAYS must not be shorter than MAX_REFRESHABLE_TOKEN_DAYS"
        );

        Self {
            secret,
            algorithm,
            access_expiry_mins,
            refresh_window_days,
            session_retention_days,
            max_failed_logins,
        }
    }
}

/// Public access token as returned to clients.
#[derive(Debug, Serialize)]
pub struct PublicAccessToken {
    pub access_token: String,
    pub token_type: &'static str,
}

impl PublicAccessToken {
    fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer",
        }
    }
}

/// Generate a fresh opaque session token.
pub fn new_session_token() -> String {
    Uuid::new_v4().to_string()
}

/// Sign a session token into a public access token.
///
/// The expiry is `now + access_expiry_mins`; the session row's `created_at`
/// carries the authoritative copy of the same deadline.
pub fn issue_public_token(
    session_token: &str,
    config: &AuthConfig,
) -> Result<PublicAccessToken, jsonwebtoken::errors::Error> {
    let exp = (chrono::Utc::now() + chrono::Duration::minutes(config.access_expiry_mins))
        .timestamp();
    let claims = Claims {
        sub: session_token.to_string(),
        exp,
    };

    let token = encode(
        &Header::new(config.algorithm),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;
    Ok(PublicAccessToken::bearer(token))
}

/// Decode a public access token, returning the embedded [`Claims`].
///
/// With `verify_exp` set, an expired signature surfaces as
/// [`CoreError::ExpiredToken`]; every other decoding failure (bad signature,
/// malformed token, wrong algorithm) is [`CoreError::TokenError`]. The
/// refresh flow decodes with `verify_exp = false` to accept tokens past
/// their expiry.
pub fn decode_token(token: &str, config: &AuthConfig, verify_exp: bool) -> CoreResult<Claims> {
    let mut validation = Validation::new(config.algorithm);
    validation.validate_exp = verify_exp;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => CoreError::ExpiredToken,
        _ => CoreError::TokenError,
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    /// Helper to build a test config with a known secret.
    fn test_config() -> AuthConfig {
        AuthConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            algorithm: Algorithm::HS256,
            access_expiry_mins: 30,
            refresh_window_days: 30,
            session_retention_days: 30,
            max_failed_logins: 5,
        }
    }

    #[test]
    fn test_issue_and_decode_round_trip() {
        let config = test_config();
        let session_token = new_session_token();

        let public = issue_public_token(&session_token, &config)
            .expect("token signing should succeed");
        assert_eq!(public.token_type, "bearer");

        let claims = decode_token(&public.access_token, &config, true)
            .expect("token validation should succeed");
        assert_eq!(claims.sub, session_token);
        assert!(claims.exp > chrono::Utc::now().timestamp());
    }

    #[test]
    fn test_expired_token_fails_only_with_verification() {
        let config = test_config();

        // Manually create an already-expired token.
        // Use a margin well beyond the default 60-second leeway.
        let claims = Claims {
            sub: new_session_token(),
            exp: chrono::Utc::now().timestamp() - 300,
        };
        let token = encode(
            &Header::new(config.algorithm),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        assert_matches!(
            decode_token(&token, &config, true),
            Err(CoreError::ExpiredToken)
        );

        // The refresh path must still be able to read it.
        let decoded = decode_token(&token, &config, false)
            .expect("decoding without expiry verification should succeed");
        assert_eq!(decoded.sub, claims.sub);
    }

    #[test]
    fn test_garbage_token_is_a_token_error() {
        let config = test_config();
        assert_matches!(
            decode_token("not-a-jwt-at-all", &config, true),
            Err(CoreError::TokenError)
        );
        assert_matches!(
            decode_token("not-a-jwt-at-all", &config, false),
            Err(CoreError::TokenError)
        );
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_a = test_config();
        let config_b = AuthConfig {
            secret: "a-completely-different-secret".to_string(),
            ..test_config()
        };

        let public = issue_public_token("some-session-token", &config_a)
            .expect("token signing should succeed");

        assert_matches!(
            decode_token(&public.access_token, &config_b, true),
            Err(CoreError::TokenError)
        );
    }

    #[test]
    fn test_session_tokens_are_unique() {
        assert_ne!(new_session_token(), new_session_token());
    }
}
