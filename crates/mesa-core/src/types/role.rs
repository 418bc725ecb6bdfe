//! Identity role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles carried in token claims.
///
/// Owner and Employee are registered staff accounts; Guest is a table
/// session created when a customer scans a table QR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Role {
    /// Restaurant owner — full management access.
    Owner,
    /// Staff member — management access except owner-only areas.
    Employee,
    /// Guest table session — ordering only.
    Guest,
}

impl Role {
    /// Whether this role belongs to the staff side (non-guest).
    pub fn is_staff(&self) -> bool {
        !matches!(self, Self::Guest)
    }

    /// Whether this role is the owner.
    pub fn is_owner(&self) -> bool {
        matches!(self, Self::Owner)
    }

    /// Return the role as its canonical string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "Owner",
            Self::Employee => "Employee",
            Self::Guest => "Guest",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = crate::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "owner" => Ok(Self::Owner),
            "employee" => Ok(Self::Employee),
            "guest" => Ok(Self::Guest),
            _ => Err(crate::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: Owner, Employee, Guest"
            ))),
        }
    }
}
