//! `AuthIdentity` extractor — validates the Bearer token on business calls.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use mesa_auth::TokenKind;
use mesa_core::error::AppError;
use mesa_core::types::Role;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller context available in handlers.
///
/// Unlike the edge gate, this extractor performs a full signature check:
/// the Authorization header is attacker-controlled input.
#[derive(Debug, Clone)]
pub struct AuthIdentity {
    /// Identity ID from the verified claims.
    pub identity_id: Uuid,
    /// Role from the verified claims.
    pub role: Role,
    /// Display name.
    pub name: String,
}

impl FromRequestParts<AppState> for AuthIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

        let claims = state.verifier.verify(token, TokenKind::Access)?;
        if claims.is_expired() {
            return Err(AppError::token_expired("Access token has expired").into());
        }

        Ok(AuthIdentity {
            identity_id: claims.sub,
            role: claims.role,
            name: claims.name,
        })
    }
}
