//! Integration tests for the page gate and page models.

mod common;

use axum::http::header::LOCATION;
use axum::http::StatusCode;
use common::{body_json, get, get_auth, get_with_cookie, signup_token};
use daybook_core::dates::Day;
use sqlx::SqlitePool;

fn location(response: &axum::http::Response<axum::body::Body>) -> String {
    response
        .headers()
        .get(LOCATION)
        .expect("redirect must carry a Location header")
        .to_str()
        .unwrap()
        .to_string()
}

fn today_path() -> String {
    format!("/{}", Day::today())
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_root_redirects_signed_out_to_login(pool: SqlitePool) {
    let response = get(common::build_test_app(pool), "/").await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/login");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_root_redirects_signed_in_to_today(pool: SqlitePool) {
    let token = signup_token(common::build_test_app(pool.clone()), "a@test.com").await;
    let response = get_with_cookie(common::build_test_app(pool), "/", &token).await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), today_path());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_day_page_requires_session(pool: SqlitePool) {
    let response = get(common::build_test_app(pool.clone()), "/2024-04-29").await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/login");

    let response = get_with_cookie(common::build_test_app(pool), "/2024-04-29", "expired-or-forged").await;
    assert_eq!(location(&response), "/login");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_auth_pages_for_signed_out_visitors(pool: SqlitePool) {
    let response = get(common::build_test_app(pool.clone()), "/login").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["page"], "login");
    assert_eq!(json["data"]["alternatePath"], "/signup");

    let response = get(common::build_test_app(pool), "/signup").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["page"], "signup");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_auth_pages_redirect_signed_in_users(pool: SqlitePool) {
    let token = signup_token(common::build_test_app(pool.clone()), "a@test.com").await;

    for path in ["/login", "/signup"] {
        let response = get_with_cookie(common::build_test_app(pool.clone()), path, &token).await;
        assert!(response.status().is_redirection(), "{path}");
        assert_eq!(location(&response), today_path());
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_day_page_model(pool: SqlitePool) {
    let token = signup_token(common::build_test_app(pool.clone()), "a@test.com").await;

    let response = get_with_cookie(common::build_test_app(pool.clone()), "/2024-12-31", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["page"], "day");
    assert_eq!(json["data"]["view"]["label"], "December 31st, 2024");
    assert_eq!(json["data"]["view"]["next"], "2025-01-01");
    assert_eq!(json["data"]["view"]["categories"].as_array().unwrap().len(), 7);

    // Bearer works for pages too.
    let response = get_auth(common::build_test_app(pool), "/2024-12-31?q=bills", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["view"]["categories"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_day_page_with_invalid_date(pool: SqlitePool) {
    let token = signup_token(common::build_test_app(pool.clone()), "a@test.com").await;
    let response = get_with_cookie(common::build_test_app(pool), "/2023-02-29", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_DATE");
}
