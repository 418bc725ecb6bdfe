//! Integration tests for the auth endpoints.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_login_sets_both_cookies() {
    let app = TestApp::new().await;

    let response = app.login("owner@test.dev", "owner-pass").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["accessToken"].is_string());
    assert!(response.body["data"]["refreshToken"].is_string());
    assert_eq!(response.body["data"]["role"], "Owner");

    let cookies = response.set_cookies();
    assert!(cookies.iter().any(|c| c.starts_with("accessToken=")));
    assert!(cookies.iter().any(|c| c.starts_with("refreshToken=")));
    assert!(cookies.iter().all(|c| c.contains("HttpOnly")));
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new().await;

    let response = app.login("owner@test.dev", "wrong").await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "AUTHENTICATION");
}

#[tokio::test]
async fn test_guest_login() {
    let app = TestApp::new().await;

    let response = app.guest_login("vy", 4).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["role"], "Guest");
}

#[tokio::test]
async fn test_guest_login_unknown_table() {
    let app = TestApp::new().await;

    let response = app.guest_login("vy", 99).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_refresh_rotates_pair_from_cookie() {
    let app = TestApp::new().await;
    let login = app.login("staff@test.dev", "staff-pass").await;
    let old_refresh = login.body["data"]["refreshToken"].as_str().unwrap().to_string();

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            None,
            Some(&login.cookie_header()),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let new_refresh = response.body["data"]["refreshToken"].as_str().unwrap();
    assert!(response.body["data"]["accessToken"].is_string());
    assert_ne!(new_refresh, old_refresh);

    // Rotation replaces both cookies.
    let cookies = response.set_cookies();
    assert!(cookies.iter().any(|c| c.starts_with("accessToken=")));
    assert!(cookies.iter().any(|c| c.starts_with("refreshToken=")));
}

#[tokio::test]
async fn test_refresh_with_body_token() {
    let app = TestApp::new().await;
    let login = app.login("staff@test.dev", "staff-pass").await;
    let refresh = login.body["data"]["refreshToken"].as_str().unwrap().to_string();

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refreshToken": refresh })),
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_with_tampered_token_clears_cookies() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refreshToken": "not.a.token" })),
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "TOKEN_INVALID");

    // Both cookies are cleared on rejection.
    let cookies = response.set_cookies();
    assert!(cookies.iter().any(|c| c.starts_with("accessToken=;")
        || (c.starts_with("accessToken=") && c.contains("Max-Age=0"))));
}

#[tokio::test]
async fn test_refresh_without_token() {
    let app = TestApp::new().await;

    let response = app.request("POST", "/api/auth/refresh", None, None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_requires_bearer_and_clears_cookies() {
    let app = TestApp::new().await;
    let login = app.login("staff@test.dev", "staff-pass").await;
    let access = login.body["data"]["accessToken"].as_str().unwrap().to_string();

    let unauthenticated = app.request("POST", "/api/auth/logout", None, None, None).await;
    assert_eq!(unauthenticated.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request(
            "POST",
            "/api/auth/logout",
            None,
            Some(&login.cookie_header()),
            Some(&access),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.set_cookies().is_empty());
}

#[tokio::test]
async fn test_access_token_carries_claims() {
    let app = TestApp::new().await;
    let login = app.login("owner@test.dev", "owner-pass").await;
    let access = login.body["data"]["accessToken"].as_str().unwrap();

    let claims = mesa_auth::decode_unverified(access).unwrap();
    assert_eq!(claims.role, mesa_core::types::Role::Owner);
    assert_eq!(
        claims.sub.to_string(),
        login.body["data"]["identityId"].as_str().unwrap()
    );
}
