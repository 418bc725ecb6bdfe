//! Domain events emitted by Mesa operations.
//!
//! Business collaborators (order handling, payment) publish domain events
//! onto the [`bus::EventBus`]; the real-time engine consumes them and
//! translates them into the wire vocabulary in [`contract`].

pub mod bus;
pub mod contract;
pub mod order;
pub mod payment;
pub mod session;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use bus::EventBus;
pub use contract::RealtimeEvent;
pub use order::{OrderEvent, OrderStatus, OrderUpdate};
pub use payment::{PaymentEvent, PaymentNotice};
pub use session::SessionEvent;

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The identity that caused the event (if applicable).
    pub actor_id: Option<Uuid>,
    /// The event payload.
    pub payload: EventPayload,
}

/// Union of all domain event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum EventPayload {
    /// An order-related event.
    Order(OrderEvent),
    /// A payment-related event.
    Payment(PaymentEvent),
    /// A session-related event.
    Session(SessionEvent),
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(actor_id: Option<Uuid>, payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            actor_id,
            payload,
        }
    }
}
