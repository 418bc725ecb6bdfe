//! Token pair creation with configurable signing and TTL.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use mesa_core::config::AuthConfig;
use mesa_core::error::AppError;
use mesa_core::types::{Identity, Role};

use super::claims::{Claims, TokenKind};

/// Creates signed access and refresh token pairs.
#[derive(Clone)]
pub struct TokenIssuer {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Access token TTL in minutes.
    access_ttl_minutes: i64,
    /// Refresh token TTL in hours.
    refresh_ttl_hours: i64,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .field("refresh_ttl_hours", &self.refresh_ttl_hours)
            .finish()
    }
}

/// Result of a successful token pair generation.
///
/// A pair is always issued together and rotated together; an access token
/// never exists without the refresh token minted alongside it.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

impl TokenIssuer {
    /// Creates a new issuer from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl_minutes: config.access_ttl_minutes as i64,
            refresh_ttl_hours: config.refresh_ttl_hours as i64,
        }
    }

    /// Mints an access + refresh pair for the given identity.
    ///
    /// Fails only on signing-key misconfiguration, which is fatal and not
    /// retryable.
    pub fn issue(&self, identity: &Identity) -> Result<TokenPair, AppError> {
        self.issue_pair(identity.id, identity.role, &identity.name)
    }

    /// Mints a pair from raw claim parts. Used by rotation, which derives
    /// the new pair from the refresh token's claims rather than a full
    /// identity.
    pub fn issue_pair(&self, sub: Uuid, role: Role, name: &str) -> Result<TokenPair, AppError> {
        let now = Utc::now();
        let access_exp = now + chrono::Duration::minutes(self.access_ttl_minutes);
        let refresh_exp = now + chrono::Duration::hours(self.refresh_ttl_hours);

        let access_claims = Claims {
            sub,
            role,
            name: name.to_string(),
            iat: now.timestamp(),
            exp: access_exp.timestamp(),
            kind: TokenKind::Access,
        };

        let refresh_claims = Claims {
            sub,
            role,
            name: name.to_string(),
            iat: now.timestamp(),
            exp: refresh_exp.timestamp(),
            kind: TokenKind::Refresh,
        };

        let access_token = encode(&Header::default(), &access_claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        let refresh_token = encode(&Header::default(), &refresh_claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode refresh token: {e}")))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at: access_exp,
            refresh_expires_at: refresh_exp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::verifier::TokenVerifier;

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "unit-test-secret".to_string(),
            access_ttl_minutes: 15,
            refresh_ttl_hours: 168,
            secure_cookies: false,
        }
    }

    #[test]
    fn test_refresh_outlives_access() {
        let issuer = TokenIssuer::new(&test_config());
        let identity = Identity::guest(Uuid::new_v4(), "table-3", 3);
        let pair = issuer.issue(&identity).unwrap();
        assert!(pair.refresh_expires_at > pair.access_expires_at);
    }

    #[test]
    fn test_issue_round_trip() {
        let config = test_config();
        let issuer = TokenIssuer::new(&config);
        let verifier = TokenVerifier::new(&config);
        let identity = Identity::account(Uuid::new_v4(), Role::Employee, "an");
        let pair = issuer.issue(&identity).unwrap();

        let access = verifier.decode(&pair.access_token).unwrap();
        assert_eq!(access.sub, identity.id);
        assert_eq!(access.role, Role::Employee);
        assert_eq!(access.kind, TokenKind::Access);

        let refresh = verifier.decode(&pair.refresh_token).unwrap();
        assert_eq!(refresh.sub, identity.id);
        assert_eq!(refresh.kind, TokenKind::Refresh);
    }
}
