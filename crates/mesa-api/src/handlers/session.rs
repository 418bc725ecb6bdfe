//! Server-side session invalidation.

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use mesa_core::events::{DomainEvent, EventPayload, SessionEvent};

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthIdentity;
use crate::middleware::rbac::require_owner;
use crate::state::AppState;

/// Body of `POST /api/manage/sessions/revoke`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevokeRequest {
    /// The identity whose session is invalidated.
    pub identity_id: Uuid,
    /// Why the session is being revoked.
    pub reason: String,
}

/// POST /api/manage/sessions/revoke — owner-only.
///
/// Publishes a revocation onto the event bus; the realtime engine turns
/// it into a `refresh-token` push that makes the affected client rotate
/// immediately. Tokens already issued stay valid until rotated — the push
/// is the invalidation mechanism.
pub async fn revoke(
    State(state): State<AppState>,
    auth: AuthIdentity,
    Json(body): Json<RevokeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_owner(&auth)?;

    info!(
        identity_id = %body.identity_id,
        revoked_by = %auth.identity_id,
        reason = %body.reason,
        "Session revoked"
    );

    state.event_bus.publish(DomainEvent::new(
        Some(auth.identity_id),
        EventPayload::Session(SessionEvent::Revoked {
            identity_id: body.identity_id,
            reason: body.reason,
        }),
    ));

    Ok(Json(ApiResponse::new("Session revoked", ())))
}
