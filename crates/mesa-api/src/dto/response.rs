//! Response DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mesa_auth::TokenPair;
use mesa_core::types::Role;

/// Standard success wrapper with an application-level message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Human-readable message.
    pub message: String,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a response with the given message.
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// Token payload returned by login, guest login, and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// The freshly minted pair.
    #[serde(flatten)]
    pub tokens: TokenPair,
    /// Identity ID the pair was issued for.
    pub identity_id: Uuid,
    /// Role embedded in the pair.
    pub role: Role,
}
