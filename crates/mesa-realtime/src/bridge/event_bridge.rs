//! Domain event → realtime push translation.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use mesa_core::events::{
    DomainEvent, EventBus, EventPayload, PaymentEvent, RealtimeEvent, SessionEvent,
};

use crate::connection::registry::ConnectionRegistry;

/// Consumes the event bus and forwards events to connections.
///
/// Order and payment events go to the owning guest's connection and to
/// the management group; session revocations become a `refresh-token`
/// push that makes the affected client force-rotate its pair.
#[derive(Debug)]
pub struct EventBridge {
    registry: Arc<ConnectionRegistry>,
}

impl EventBridge {
    /// Creates a bridge over the registry.
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Spawns the forwarding task. The task ends when the bus is dropped.
    pub fn spawn(self, bus: &EventBus) -> JoinHandle<()> {
        let mut rx = bus.subscribe();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => self.forward(event),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Event bridge lagged, events dropped");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            debug!("Event bridge stopped");
        })
    }

    /// Translates one domain event into pushes.
    fn forward(&self, event: DomainEvent) {
        match event.payload {
            EventPayload::Order(order_event) => {
                let update = order_event.update().clone();
                let guest_id = update.guest_id;
                let push = RealtimeEvent::UpdateOrder(update);
                self.registry.notify(guest_id, &push);
                self.registry.broadcast(&push);
            }
            EventPayload::Payment(PaymentEvent::Confirmed { notice, .. }) => {
                let guest_id = notice.guest_id;
                let push = RealtimeEvent::Payment(notice);
                self.registry.notify(guest_id, &push);
                self.registry.broadcast(&push);
            }
            EventPayload::Session(SessionEvent::Revoked { identity_id, reason }) => {
                debug!(identity_id = %identity_id, reason = %reason, "Pushing forced rotation");
                self.registry.notify(identity_id, &RealtimeEvent::RefreshToken);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesa_core::events::{OrderEvent, OrderStatus, OrderUpdate};
    use mesa_core::types::Role;
    use uuid::Uuid;

    fn order_update(guest_id: Uuid) -> OrderUpdate {
        OrderUpdate {
            order_id: Uuid::new_v4(),
            guest_id,
            table_number: 12,
            status: OrderStatus::Processing,
            dish_name: "Com tam".to_string(),
            quantity: 3,
        }
    }

    #[tokio::test]
    async fn test_order_event_reaches_guest_and_management() {
        let registry = Arc::new(ConnectionRegistry::new(16));
        let bus = EventBus::new(16);
        let _task = EventBridge::new(registry.clone()).spawn(&bus);

        let guest = Uuid::new_v4();
        let owner = Uuid::new_v4();
        let (_gh, mut guest_rx) = registry.register(guest, Role::Guest, "t-12".to_string());
        let (_oh, mut owner_rx) = registry.register(owner, Role::Owner, "boss".to_string());

        bus.publish(DomainEvent::new(
            Some(guest),
            EventPayload::Order(OrderEvent::Placed {
                update: order_update(guest),
            }),
        ));

        let guest_frame = guest_rx.recv().await.unwrap();
        assert!(guest_frame.contains("update-order"));
        let owner_frame = owner_rx.recv().await.unwrap();
        assert!(owner_frame.contains("update-order"));
    }

    #[tokio::test]
    async fn test_session_revocation_pushes_refresh_token() {
        let registry = Arc::new(ConnectionRegistry::new(16));
        let bus = EventBus::new(16);
        let _task = EventBridge::new(registry.clone()).spawn(&bus);

        let employee = Uuid::new_v4();
        let (_h, mut rx) = registry.register(employee, Role::Employee, "an".to_string());

        bus.publish(DomainEvent::new(
            None,
            EventPayload::Session(SessionEvent::Revoked {
                identity_id: employee,
                reason: "role changed".to_string(),
            }),
        ));

        let frame = rx.recv().await.unwrap();
        assert!(frame.contains("refresh-token"));
    }
}
