//! Request DTOs.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Body of `POST /api/auth/guest/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestLoginRequest {
    /// Guest display name.
    pub name: String,
    /// Table the guest is seated at.
    pub table_number: u32,
}

/// Body of `POST /api/auth/refresh`.
///
/// The refresh token may also arrive as a cookie; the body wins when
/// both are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    /// The refresh token to rotate.
    pub refresh_token: Option<String>,
}
