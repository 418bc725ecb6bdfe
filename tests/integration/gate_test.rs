//! Integration tests for the edge gate on real page requests.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_private_path_without_cookies_redirects_to_login() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/manage/accounts", None, None, None)
        .await;

    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.location(), Some("/login?clearTokens=true"));
}

#[tokio::test]
async fn test_employee_on_owner_only_path_redirects_home() {
    let app = TestApp::new().await;
    let login = app.login("staff@test.dev", "staff-pass").await;

    let response = app
        .request(
            "GET",
            "/manage/accounts",
            None,
            Some(&login.cookie_header()),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.location(), Some("/"));
}

#[tokio::test]
async fn test_owner_reaches_owner_only_path() {
    let app = TestApp::new().await;
    let login = app.login("owner@test.dev", "owner-pass").await;

    let response = app
        .request(
            "GET",
            "/manage/accounts",
            None,
            Some(&login.cookie_header()),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_logged_in_login_page_redirects_home() {
    let app = TestApp::new().await;
    let login = app.login("staff@test.dev", "staff-pass").await;

    let response = app
        .request("GET", "/login", None, Some(&login.cookie_header()), None)
        .await;

    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.location(), Some("/"));
}

#[tokio::test]
async fn test_oauth_callback_passes_login_gate() {
    let app = TestApp::new().await;
    let login = app.login("staff@test.dev", "staff-pass").await;

    let response = app
        .request(
            "GET",
            "/login?accessToken=fresh-token",
            None,
            Some(&login.cookie_header()),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_guest_passes_guest_path() {
    let app = TestApp::new().await;
    let login = app.guest_login("vy", 4).await;

    let response = app
        .request("GET", "/guest/menu", None, Some(&login.cookie_header()), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_guest_on_manage_path_redirects_home() {
    let app = TestApp::new().await;
    let login = app.guest_login("vy", 4).await;

    let response = app
        .request(
            "GET",
            "/manage/dashboard",
            None,
            Some(&login.cookie_header()),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.location(), Some("/"));
}

#[tokio::test]
async fn test_missing_access_cookie_detours_to_refresh_page() {
    let app = TestApp::new().await;
    let login = app.login("staff@test.dev", "staff-pass").await;
    let refresh = login.body["data"]["refreshToken"].as_str().unwrap();

    // Only the refresh cookie survives (the access cookie expired).
    let cookie = format!("refreshToken={refresh}");
    let response = app
        .request("GET", "/manage/orders", None, Some(&cookie), None)
        .await;

    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
    let location = response.location().unwrap();
    assert!(location.starts_with("/refresh-token?refreshToken="));
    assert!(location.ends_with("&redirect=/manage/orders"));
}

#[tokio::test]
async fn test_public_path_untouched() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/", None, None, None).await;

    assert_eq!(response.status, StatusCode::OK);
}
