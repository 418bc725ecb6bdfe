//! The closed wire vocabulary exchanged over the realtime channel.
//!
//! Every frame pushed registry → client is one of these events, serialized
//! as `{"event": "<name>", "payload": ...}`. Delivery is at-most-once:
//! no acknowledgment, no replay on reconnect.

use serde::{Deserialize, Serialize};

use super::order::OrderUpdate;
use super::payment::PaymentNotice;

/// A named realtime event with its payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "kebab-case")]
pub enum RealtimeEvent {
    /// Instructs the receiving client to force-rotate its token pair,
    /// bypassing the lifetime heuristic. No payload.
    RefreshToken,
    /// An order was created or its status changed.
    UpdateOrder(OrderUpdate),
    /// A payment was confirmed for a guest's orders.
    Payment(PaymentNotice),
}

impl RealtimeEvent {
    /// The wire name of this event.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RefreshToken => "refresh-token",
            Self::UpdateOrder(_) => "update-order",
            Self::Payment(_) => "payment",
        }
    }
}
