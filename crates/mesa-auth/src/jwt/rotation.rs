//! Rotation policy and just-in-time pair rotation.

use chrono::{DateTime, Utc};
use tracing::debug;

use mesa_core::error::AppError;

use super::claims::{Claims, TokenKind};
use super::issuer::{TokenIssuer, TokenPair};
use super::verifier::TokenVerifier;

/// Whether a token is due for rotation at the given instant.
///
/// A pair is eligible once the remaining access-token lifetime drops
/// below one third of its total lifetime: `(exp - now) < (exp - iat) / 3`.
/// Exactly one third remaining does not trigger.
pub fn needs_rotation(claims: &Claims, now: DateTime<Utc>) -> bool {
    claims.remaining_seconds_at(now) < claims.total_lifetime_seconds() / 3
}

/// Rotates access/refresh pairs from a still-valid refresh token.
#[derive(Debug, Clone)]
pub struct RotationService {
    issuer: TokenIssuer,
    verifier: TokenVerifier,
}

impl RotationService {
    /// Creates a rotation service over an issuer/verifier pair.
    pub fn new(issuer: TokenIssuer, verifier: TokenVerifier) -> Self {
        Self { issuer, verifier }
    }

    /// Verifies the refresh token and mints a fresh pair from its claims,
    /// preserving identity and role.
    ///
    /// An expired refresh token is a terminal session end
    /// (`TokenExpired`); a tampered one is `TokenInvalid`.
    pub fn rotate(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self.verifier.verify(refresh_token, TokenKind::Refresh)?;

        if claims.is_expired() {
            return Err(AppError::token_expired("Refresh token has expired"));
        }

        debug!(identity_id = %claims.sub, role = %claims.role, "Rotating token pair");
        self.issuer.issue_pair(claims.sub, claims.role, &claims.name)
    }
}
