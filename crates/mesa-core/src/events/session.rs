//! Session-related domain events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events related to authenticated sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// A session was invalidated server-side (administrative action,
    /// role change). The affected client must force-rotate its pair.
    Revoked {
        /// The identity whose session was invalidated.
        identity_id: Uuid,
        /// Why the session was invalidated.
        reason: String,
    },
}
