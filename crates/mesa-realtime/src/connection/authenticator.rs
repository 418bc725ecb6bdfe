//! Handshake authentication — the one place signature verification is
//! mandatory before a role is trusted.

use std::sync::Arc;

use uuid::Uuid;

use mesa_auth::{TokenKind, TokenVerifier};
use mesa_core::error::AppError;
use mesa_core::types::Role;

use crate::message::wire::HandshakeFrame;

/// Authenticated connection info extracted from the handshake credential.
#[derive(Debug, Clone)]
pub struct AuthenticatedConnection {
    /// Identity ID.
    pub identity_id: Uuid,
    /// Role from the verified claims.
    pub role: Role,
    /// Display name.
    pub name: String,
}

/// Authenticates realtime handshakes using the token service.
#[derive(Clone)]
pub struct HandshakeAuthenticator {
    verifier: Arc<TokenVerifier>,
}

impl std::fmt::Debug for HandshakeAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandshakeAuthenticator").finish()
    }
}

impl HandshakeAuthenticator {
    /// Creates a new handshake authenticator.
    pub fn new(verifier: Arc<TokenVerifier>) -> Self {
        Self { verifier }
    }

    /// Authenticates the raw first frame of a connection attempt.
    ///
    /// Absence of the `Authorization` field is a hard rejection. The
    /// credential goes through full `verify`; an expired access token is
    /// rejected distinctly so the client knows to rotate before retrying.
    pub fn authenticate(&self, raw_frame: &str) -> Result<AuthenticatedConnection, AppError> {
        let frame = HandshakeFrame::parse(raw_frame)?;
        let authorization = frame
            .authorization
            .ok_or_else(|| AppError::authentication("Missing Authorization in handshake"))?;

        let token = authorization
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::authentication("Invalid Authorization format"))?;

        let claims = self.verifier.verify(token, TokenKind::Access)?;
        if claims.is_expired() {
            return Err(AppError::token_expired("Access token has expired"));
        }

        Ok(AuthenticatedConnection {
            identity_id: claims.sub,
            role: claims.role,
            name: claims.name,
        })
    }
}
