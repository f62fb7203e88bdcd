//! HTTP-level integration tests for the session endpoints.
//!
//! Tests cover both login flavors, logout, session refresh, the failed-login
//! lockout, and the error codes carried by rejected tokens.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get_auth, post_auth, post_form, post_json};
use linkvault_core::password::hash_password;
use linkvault_db::models::user::{CreateUser, User};
use linkvault_db::repositories::UserRepo;
use sqlx::PgPool;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create a test user directly in the database and return the user row plus
/// the plaintext password used.
async fn create_test_user(pool: &PgPool, email: &str) -> (User, String) {
    let password = "test_password_123!";
    let hashed = hash_password(password).expect("hashing should succeed");
    let input = CreateUser {
        email: email.to_string(),
        password_hash: hashed,
    };
    let user = UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");
    (user, password.to_string())
}

/// Log in through `POST /api/token` and return the bearer token string.
async fn login_user(app: axum::Router, email: &str, password: &str) -> String {
    let body = serde_json::json!({ "username": email, "password": password });
    let response = post_json(app, "/api/token", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["token_type"], "bearer");
    json["access_token"]
        .as_str()
        .expect("response must contain access_token")
        .to_string()
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// The form-encoded login variant returns a bearer token.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_form_returns_bearer_token(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "form@test.com").await;
    let app = common::build_test_app(pool);

    let body = format!("username=form@test.com&password={password}");
    let response = post_form(app, "/api/login", &body).await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert_eq!(json["token_type"], "bearer");
}

/// The JSON login variant works and resets the failed-attempt counter.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_json_resets_failed_attempts(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "json@test.com").await;
    UserRepo::increment_failed_attempts(&pool, user.id)
        .await
        .expect("increment should succeed");
    UserRepo::increment_failed_attempts(&pool, user.id)
        .await
        .expect("increment should succeed");

    let app = common::build_test_app(pool.clone());
    login_user(app, "json@test.com", &password).await;

    let user = UserRepo::find_by_email(&pool, "json@test.com")
        .await
        .expect("lookup should succeed")
        .expect("user must exist");
    assert_eq!(user.failed_attempts, 0);
    assert!(user.last_login_at.is_some(), "login must stamp last_login_at");
}

/// The JSON login variant refuses a username that is not an email address.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_json_rejects_malformed_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "not-an-email", "password": "whatever" });
    let response = post_json(app, "/api/token", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], 1002);
}

/// A wrong password is rejected and recorded on the account.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_wrong_password_increments_counter(pool: PgPool) {
    let (_user, _password) = create_test_user(&pool, "wrongpw@test.com").await;
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({ "username": "wrongpw@test.com", "password": "incorrect" });
    let response = post_json(app, "/api/token", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], 2001);

    let user = UserRepo::find_by_email(&pool, "wrongpw@test.com")
        .await
        .expect("lookup should succeed")
        .expect("user must exist");
    assert_eq!(user.failed_attempts, 1);
}

/// An unknown email fails exactly like a wrong password.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_unknown_email_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "ghost@test.com", "password": "whatever" });
    let response = post_json(app, "/api/token", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], 2001);
}

/// A deactivated account cannot log in even with the correct password.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_deactivated_account_rejected(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "inactive@test.com").await;
    sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .expect("deactivation should succeed");

    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "inactive@test.com", "password": password });
    let response = post_json(app, "/api/token", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], 2001);
}

/// Once the lockout threshold is reached, even the correct password is
/// refused with the max-attempts code.
#[sqlx::test(migrations = "../db/migrations")]
async fn lockout_holds_against_correct_password(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "locked@test.com").await;
    let app = common::build_test_app(pool);

    // Five wrong passwords reach the default threshold.
    for _ in 0..5 {
        let body = serde_json::json!({ "username": "locked@test.com", "password": "incorrect" });
        let response = post_json(app.clone(), "/api/token", body).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let body = serde_json::json!({ "username": "locked@test.com", "password": password });
    let response = post_json(app, "/api/token", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], 2002);
}

// ---------------------------------------------------------------------------
// Logout
// ---------------------------------------------------------------------------

/// Logout deletes the session; the token stops working immediately.
#[sqlx::test(migrations = "../db/migrations")]
async fn logout_kills_the_session(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "logout@test.com").await;
    let app = common::build_test_app(pool);

    let token = login_user(app.clone(), "logout@test.com", &password).await;

    let response = post_auth(app.clone(), "/api/logout", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");

    // The session is gone, so the same token no longer resolves.
    let response = get_auth(app, "/api/bookmarks", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], 2007);
}

/// A request without the Authorization header is turned away.
#[sqlx::test(migrations = "../db/migrations")]
async fn missing_bearer_header_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/logout")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], 2007);
}

/// A string that is not a JWT at all is rejected as a malformed token.
#[sqlx::test(migrations = "../db/migrations")]
async fn garbage_token_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/bookmarks", "not-a-jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], 2007);
}

// ---------------------------------------------------------------------------
// Session refresh
// ---------------------------------------------------------------------------

/// Refreshing a session that has not expired yet is refused.
#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_rejects_fresh_session(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "fresh@test.com").await;
    let app = common::build_test_app(pool);

    let token = login_user(app.clone(), "fresh@test.com", &password).await;

    let response = post_auth(app, "/api/refresh-session", &token).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], 2006);
}

/// An expired session can be exchanged for a new one; the old row stays
/// behind for the pruning sweep.
#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_exchanges_expired_session(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "expired@test.com").await;
    // Zero-minute expiry: every session is expired as soon as it exists.
    let app = common::build_test_app_with(pool.clone(), common::test_config_expiring_now());

    let token = login_user(app.clone(), "expired@test.com", &password).await;

    let response = post_auth(app, "/api/refresh-session", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["token_type"], "bearer");
    let new_token = json["access_token"].as_str().expect("new access_token");
    assert_ne!(new_token, token, "refresh must mint a fresh token");

    let session_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
        .fetch_one(&pool)
        .await
        .expect("count should succeed");
    assert_eq!(session_count, 2, "the old session row must be kept");
}

/// An expired token cannot reach authenticated endpoints.
#[sqlx::test(migrations = "../db/migrations")]
async fn expired_token_rejected_by_auth(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "stale@test.com").await;
    let app = common::build_test_app_with(pool, common::test_config_expiring_now());

    let token = login_user(app.clone(), "stale@test.com", &password).await;

    let response = get_auth(app, "/api/bookmarks", &token).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], 2005);
}
