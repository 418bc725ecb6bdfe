//! Integration tests for the event bridge and session revocation.

use http::StatusCode;

use mesa_core::events::{DomainEvent, EventPayload, OrderEvent, OrderStatus, OrderUpdate};
use mesa_core::types::Role;
use uuid::Uuid;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_revoke_pushes_refresh_token_to_target() {
    let app = TestApp::new().await;
    let login = app.login("owner@test.dev", "owner-pass").await;
    let access = login.body["data"]["accessToken"].as_str().unwrap().to_string();

    // A staff member with a live connection.
    let target = Uuid::new_v4();
    let (_handle, mut rx) = app
        .state
        .registry
        .register(target, Role::Employee, "an".to_string());

    let response = app
        .request(
            "POST",
            "/api/manage/sessions/revoke",
            Some(serde_json::json!({ "identityId": target, "reason": "role change" })),
            None,
            Some(&access),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let frame = rx.recv().await.unwrap();
    assert!(frame.contains("refresh-token"));
}

#[tokio::test]
async fn test_revoke_requires_owner() {
    let app = TestApp::new().await;
    let login = app.login("staff@test.dev", "staff-pass").await;
    let access = login.body["data"]["accessToken"].as_str().unwrap().to_string();

    let response = app
        .request(
            "POST",
            "/api/manage/sessions/revoke",
            Some(serde_json::json!({ "identityId": Uuid::new_v4(), "reason": "x" })),
            None,
            Some(&access),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_order_event_fans_out_to_guest_and_staff() {
    let app = TestApp::new().await;

    let guest = Uuid::new_v4();
    let staff = Uuid::new_v4();
    let (_gh, mut guest_rx) = app
        .state
        .registry
        .register(guest, Role::Guest, "t-4".to_string());
    let (_sh, mut staff_rx) = app
        .state
        .registry
        .register(staff, Role::Employee, "an".to_string());

    app.state.event_bus.publish(DomainEvent::new(
        Some(guest),
        EventPayload::Order(OrderEvent::Placed {
            update: OrderUpdate {
                order_id: Uuid::new_v4(),
                guest_id: guest,
                table_number: 4,
                status: OrderStatus::Pending,
                dish_name: "Pho".to_string(),
                quantity: 1,
            },
        }),
    ));

    assert!(guest_rx.recv().await.unwrap().contains("update-order"));
    assert!(staff_rx.recv().await.unwrap().contains("update-order"));
}
