//! JWT claims structure shared by access and refresh tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mesa_core::types::Role;

/// Claims payload embedded in every token.
///
/// Access and refresh tokens carry the same shape; only `exp` and `kind`
/// differ within a pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the identity ID.
    pub sub: Uuid,
    /// Role at the time of token issuance.
    pub role: Role,
    /// Display name for convenience.
    pub name: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token kind: access or refresh.
    pub kind: TokenKind,
}

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Short-lived bearer credential for business calls and handshakes.
    Access,
    /// Long-lived token used only to mint a new pair.
    Refresh,
}

impl Claims {
    /// Returns the identity ID from the subject claim.
    pub fn identity_id(&self) -> Uuid {
        self.sub
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Returns the issuance time as a `DateTime<Utc>`.
    pub fn issued_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.iat, 0).unwrap_or_else(Utc::now)
    }

    /// Checks whether this token has expired.
    ///
    /// Expiry is always the caller's branch: the verifier deliberately
    /// does not reject expired tokens so that "expired but authentic" and
    /// "invalid" stay distinct.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Checks expiry against an explicit instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Total lifetime of this token in seconds.
    pub fn total_lifetime_seconds(&self) -> i64 {
        self.exp - self.iat
    }

    /// Remaining lifetime in seconds at the given instant (may be negative).
    pub fn remaining_seconds_at(&self, now: DateTime<Utc>) -> i64 {
        self.exp - now.timestamp()
    }
}
