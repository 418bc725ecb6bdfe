//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use mesa_api::directory::MemoryDirectory;
use mesa_api::{AppState, build_app};
use mesa_core::config::AppConfig;
use mesa_core::types::Role;

/// Test application context.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Shared state, for direct access to the registry and event bus.
    pub state: AppState,
}

/// A collected response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: http::HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// All `Set-Cookie` values on this response.
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(String::from)
            .collect()
    }

    /// Builds a `Cookie` header value from this response's cookies.
    pub fn cookie_header(&self) -> String {
        self.set_cookies()
            .iter()
            .filter_map(|c| c.split(';').next())
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// The `Location` header, if any.
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

impl TestApp {
    /// Creates a test application over the in-memory directory.
    pub async fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-test-secret".to_string();
        config.auth.secure_cookies = false;

        let directory = MemoryDirectory::new((1..=10).collect());
        directory
            .seed_account("owner@test.dev", "owner-pass", Role::Owner, "Owner")
            .await
            .unwrap();
        directory
            .seed_account("staff@test.dev", "staff-pass", Role::Employee, "Staff")
            .await
            .unwrap();

        let state = AppState::new(config, Arc::new(directory));
        mesa_api::app::spawn_event_bridge(&state);
        let router = build_app(state.clone());

        Self { router, state }
    }

    /// Sends a request and collects the response.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        cookies: Option<&str>,
        bearer: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(cookies) = cookies {
            builder = builder.header(header::COOKIE, cookies);
        }
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Logs a staff account in, returning the response.
    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "email": email, "password": password })),
            None,
            None,
        )
        .await
    }

    /// Opens a guest session, returning the response.
    pub async fn guest_login(&self, name: &str, table_number: u32) -> TestResponse {
        self.request(
            "POST",
            "/api/auth/guest/login",
            Some(serde_json::json!({ "name": name, "tableNumber": table_number })),
            None,
            None,
        )
        .await
    }
}
