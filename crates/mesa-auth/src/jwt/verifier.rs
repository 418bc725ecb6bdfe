//! Token validation: full signature verification and unsigned decode.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use mesa_core::config::AuthConfig;
use mesa_core::error::AppError;

use super::claims::{Claims, TokenKind};

/// Structural decode without any key material.
///
/// The client-side counterpart of [`TokenVerifier::decode`]: reads claims
/// out of a token the holder already trusts (its own stored pair).
pub fn decode_unverified(token: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.insecure_disable_signature_validation();

    let token_data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|e| AppError::token_invalid(format!("Malformed token: {e}")))?;
    Ok(token_data.claims)
}

/// Validates token signatures and structure.
///
/// Expiry is intentionally not validated here: callers examine
/// [`Claims::is_expired`] explicitly so that "expired but structurally
/// valid" is handled differently from "invalid/tampered".
#[derive(Clone)]
pub struct TokenVerifier {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation settings for the signed path.
    validation: Validation,
    /// Validation settings for the unsigned structural decode.
    unsigned_validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    /// Creates a new verifier from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let mut unsigned_validation = Validation::new(Algorithm::HS256);
        unsigned_validation.validate_exp = false;
        unsigned_validation.insecure_disable_signature_validation();

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            unsigned_validation,
        }
    }

    /// Verifies signature, structure, and token kind.
    ///
    /// Returns the claims even when the token is expired; signature or
    /// structural failures map to `TokenInvalid`.
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::token_invalid("Invalid token signature")
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::token_invalid("Invalid token format")
                }
                _ => AppError::token_invalid(format!("Token validation failed: {e}")),
            })?;

        let claims = token_data.claims;
        if claims.kind != expected {
            return Err(AppError::token_invalid(match expected {
                TokenKind::Access => "Invalid token kind: expected access token",
                TokenKind::Refresh => "Invalid token kind: expected refresh token",
            }));
        }

        Ok(claims)
    }

    /// Structural decode without signature verification.
    ///
    /// Only for tokens whose authenticity was already established by
    /// transport (a cookie set by the login/refresh flow). Must never be
    /// the sole authorization check.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.unsigned_validation)
            .map_err(|e| AppError::token_invalid(format!("Malformed token: {e}")))?;
        Ok(token_data.claims)
    }
}
