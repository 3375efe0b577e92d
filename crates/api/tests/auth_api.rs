//! HTTP-level integration tests for the auth endpoints.
//!
//! Tests cover signup, login, token refresh, logout, and the session cookie.

mod common;

use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use common::{body_json, get_auth, get_with_cookie, post_auth, post_json, signup, TEST_PASSWORD};
use sqlx::SqlitePool;

fn set_cookie(response: &axum::http::Response<axum::body::Body>) -> String {
    response
        .headers()
        .get(SET_COOKIE)
        .expect("response must set a cookie")
        .to_str()
        .unwrap()
        .to_string()
}

// ---------------------------------------------------------------------------
// Signup
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_returns_tokens_and_cookie(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "email": " New@Test.com ", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/signup", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = set_cookie(&response);
    assert!(cookie.starts_with("daybook_session="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("; Secure"));

    let json = body_json(response).await;
    assert!(json["data"]["accessToken"].is_string());
    assert!(json["data"]["refreshToken"].is_string());
    assert_eq!(json["data"]["expiresIn"], 3600);
    assert_eq!(json["data"]["user"]["email"], "new@test.com");
    assert!(json["data"]["user"].get("passwordHash").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_duplicate_email_conflicts(pool: SqlitePool) {
    signup(common::build_test_app(pool.clone()), "dup@test.com").await;

    let body = serde_json::json!({ "email": "DUP@test.com", "password": TEST_PASSWORD });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_rejects_short_password(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "email": "short@test.com", "password": "1234567" });
    let response = post_json(app, "/api/v1/auth/signup", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("at least 8"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_rejects_bad_email(pool: SqlitePool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "email": "not-an-email", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: SqlitePool) {
    let created = signup(common::build_test_app(pool.clone()), "login@test.com").await;

    let body = serde_json::json!({ "email": "login@test.com", "password": TEST_PASSWORD });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookie(&response).starts_with("daybook_session="));
    let json = body_json(response).await;
    assert_eq!(json["data"]["user"]["id"], created["user"]["id"]);
    assert!(json["data"]["user"]["lastLoginAt"].is_number());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password(pool: SqlitePool) {
    signup(common::build_test_app(pool.clone()), "wrong@test.com").await;

    let body = serde_json::json!({ "email": "wrong@test.com", "password": "incorrect-password" });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_unknown_email(pool: SqlitePool) {
    let body = serde_json::json!({ "email": "ghost@test.com", "password": TEST_PASSWORD });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Refresh / logout / me
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_token_refresh_rotates(pool: SqlitePool) {
    let created = signup(common::build_test_app(pool.clone()), "refresh@test.com").await;
    let refresh_token = created["refreshToken"].as_str().unwrap().to_string();

    let body = serde_json::json!({ "refreshToken": refresh_token });
    let response = post_json(common::build_test_app(pool.clone()), "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_ne!(json["data"]["refreshToken"].as_str().unwrap(), refresh_token);

    // The used refresh token is single use.
    let body = serde_json::json!({ "refreshToken": refresh_token });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_concurrent_refreshes_rotate_once(pool: SqlitePool) {
    let created = signup(common::build_test_app(pool.clone()), "race@test.com").await;
    let body = serde_json::json!({ "refreshToken": created["refreshToken"] });

    let (first, second) = tokio::join!(
        post_json(common::build_test_app(pool.clone()), "/api/v1/auth/refresh", body.clone()),
        post_json(common::build_test_app(pool.clone()), "/api/v1/auth/refresh", body),
    );

    let mut statuses = vec![first.status(), second.status()];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::OK, StatusCode::UNAUTHORIZED]);

    // Signup plus exactly one rotation: one live session remains.
    let live: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_sessions WHERE is_revoked = 0")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(live, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout_revokes_sessions_and_clears_cookie(pool: SqlitePool) {
    let created = signup(common::build_test_app(pool.clone()), "logout@test.com").await;
    let token = created["accessToken"].as_str().unwrap();
    let refresh_token = created["refreshToken"].as_str().unwrap();

    let response = post_auth(common::build_test_app(pool.clone()), "/api/v1/auth/logout", token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(set_cookie(&response).contains("Max-Age=0"));

    let body = serde_json::json!({ "refreshToken": refresh_token });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_with_bearer_and_cookie(pool: SqlitePool) {
    let created = signup(common::build_test_app(pool.clone()), "me@test.com").await;
    let token = created["accessToken"].as_str().unwrap();

    let response = get_auth(common::build_test_app(pool.clone()), "/api/v1/auth/me", token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["email"], "me@test.com");

    let response = get_with_cookie(common::build_test_app(pool), "/api/v1/auth/me", token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_without_token_is_unauthorized(pool: SqlitePool) {
    let response = common::get(common::build_test_app(pool.clone()), "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(common::build_test_app(pool), "/api/v1/auth/me", "garbage").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
