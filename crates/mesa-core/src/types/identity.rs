//! Authenticated principals: registered accounts and guest table sessions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::Role;

/// An authenticated principal.
///
/// Either a registered account (owner or employee) or a guest table
/// session. The role is embedded into token claims at issuance, so
/// downstream components never look it up again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// Stable identity ID.
    pub id: Uuid,
    /// Role at issuance time.
    pub role: Role,
    /// Display name (account name or guest name).
    pub name: String,
    /// Account or guest session.
    pub kind: IdentityKind,
}

/// The two kinds of principal Mesa authenticates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IdentityKind {
    /// A registered staff account.
    Account,
    /// A guest session bound to a physical table.
    Guest {
        /// The table the guest is seated at.
        table_number: u32,
    },
}

impl Identity {
    /// Create a registered account identity.
    pub fn account(id: Uuid, role: Role, name: impl Into<String>) -> Self {
        Self {
            id,
            role,
            name: name.into(),
            kind: IdentityKind::Account,
        }
    }

    /// Create a guest table-session identity. Guests always carry the
    /// Guest role.
    pub fn guest(id: Uuid, name: impl Into<String>, table_number: u32) -> Self {
        Self {
            id,
            role: Role::Guest,
            name: name.into(),
            kind: IdentityKind::Guest { table_number },
        }
    }

    /// Whether this identity is a guest table session.
    pub fn is_guest(&self) -> bool {
        matches!(self.kind, IdentityKind::Guest { .. })
    }
}
