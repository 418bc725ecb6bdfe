//! In-process event bus carrying domain events between collaborators.

use tokio::sync::broadcast;
use tracing::debug;

use super::DomainEvent;

/// Fan-out bus for domain events.
///
/// Publishers are business collaborators (order and payment services);
/// the real-time engine subscribes and forwards to live connections.
/// Events published with no subscribers are dropped.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    /// Create a bus with the given buffer capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: DomainEvent) {
        let receivers = self.tx.receiver_count();
        if self.tx.send(event).is_err() {
            debug!(receivers, "Domain event dropped: no subscribers");
        }
    }

    /// Subscribe to the event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
