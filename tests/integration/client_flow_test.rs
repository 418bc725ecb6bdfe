//! End-to-end: the refresh scheduler against a live server.

use std::sync::Arc;

use mesa_auth::{Claims, TokenKind, TokenPair};
use mesa_client::{HttpRefreshTransport, RefreshOutcome, RefreshScheduler, SchedulerEvent, TokenStore};
use mesa_core::config::ClientConfig;
use mesa_core::types::Role;
use uuid::Uuid;

use crate::helpers::TestApp;

/// Serves the app on an ephemeral port, returning its base URL.
async fn serve(app: &TestApp) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app.router.clone();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn client_config(base_url: String) -> ClientConfig {
    ClientConfig {
        refresh_cadence_seconds: 600,
        guard_cooldown_ms: 10,
        backend_url: base_url,
    }
}

#[tokio::test]
async fn test_forced_rotation_against_live_server() {
    let app = TestApp::new().await;
    let base_url = serve(&app).await;

    let login = app.login("staff@test.dev", "staff-pass").await;
    let pair: TokenPair = serde_json::from_value(login.body["data"].clone()).unwrap();
    let original_refresh = pair.refresh_token.clone();

    let store = Arc::new(TokenStore::new());
    store.set(pair).await;

    let config = client_config(base_url);
    let transport = Arc::new(HttpRefreshTransport::new(&config).unwrap());
    let (scheduler, mut events) = RefreshScheduler::new(&config, Arc::clone(&store), transport);

    // Fresh pair: the cadence check does nothing, a forced trigger rotates.
    assert_eq!(
        scheduler.check_and_refresh(false).await,
        RefreshOutcome::Skipped
    );
    assert_eq!(
        scheduler.check_and_refresh(true).await,
        RefreshOutcome::Rotated
    );
    assert_eq!(events.recv().await, Some(SchedulerEvent::Rotated));

    let rotated = store.get().await.unwrap();
    assert_ne!(rotated.refresh_token, original_refresh);

    let claims = mesa_auth::decode_unverified(&rotated.access_token).unwrap();
    assert_eq!(claims.role, Role::Employee);
}

#[tokio::test]
async fn test_server_rejection_ends_session_end_to_end() {
    let app = TestApp::new().await;
    let base_url = serve(&app).await;

    // Decodable but signed with the wrong key: the client's local check
    // passes, the server's verify rejects.
    let now = chrono::Utc::now().timestamp();
    let forged_claims = Claims {
        sub: Uuid::new_v4(),
        role: Role::Employee,
        name: "mallory".to_string(),
        iat: now,
        exp: now + 3600,
        kind: TokenKind::Refresh,
    };
    let forged = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &forged_claims,
        &jsonwebtoken::EncodingKey::from_secret(b"wrong-secret"),
    )
    .unwrap();

    let store = Arc::new(TokenStore::new());
    store
        .set(TokenPair {
            access_token: forged.clone(),
            refresh_token: forged,
            access_expires_at: chrono::Utc::now(),
            refresh_expires_at: chrono::Utc::now() + chrono::Duration::hours(1),
        })
        .await;

    let config = client_config(base_url);
    let transport = Arc::new(HttpRefreshTransport::new(&config).unwrap());
    let (scheduler, mut events) = RefreshScheduler::new(&config, Arc::clone(&store), transport);

    let outcome = scheduler.check_and_refresh(true).await;

    assert_eq!(outcome, RefreshOutcome::SessionEnded);
    assert_eq!(events.recv().await, Some(SchedulerEvent::SessionEnded));
    assert!(store.get().await.is_none());
    assert!(scheduler.is_stopped());
}
