//! Identity provider trait — the abstract business API behind login.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::result::AppResult;
use crate::types::Identity;

/// Staff login credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Guest table-session login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestLogin {
    /// Guest display name.
    pub name: String,
    /// Table the guest is seated at.
    pub table_number: u32,
}

/// Trait for the backend that authenticates principals.
///
/// The session/realtime core never stores credentials itself; it asks
/// this collaborator for an [`Identity`] and mints tokens from it.
#[async_trait]
pub trait IdentityProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Authenticate a staff account. Fails with an authentication error
    /// on unknown email or wrong password.
    async fn login(&self, credentials: &LoginCredentials) -> AppResult<Identity>;

    /// Open a guest session for a table. Fails with a validation error
    /// if the table does not exist.
    async fn guest_login(&self, login: &GuestLogin) -> AppResult<Identity>;

    /// End a principal's session on the business side.
    async fn logout(&self, identity_id: Uuid) -> AppResult<()>;
}
