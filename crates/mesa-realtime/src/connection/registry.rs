//! Connection registry — one live connection per identity, plus the
//! management broadcast group.

use std::sync::Arc;

use dashmap::{DashMap, DashSet};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use mesa_core::events::RealtimeEvent;
use mesa_core::types::Role;

use crate::message::wire::encode_event;

use super::handle::{ConnectionHandle, ConnectionId};

/// Maps each identity to its currently-live connection.
///
/// Registration is an upsert: a second handshake for the same identity
/// overwrites the record, superseding the previous connection without
/// closing it. The orphaned handle dies with its own socket task. Two
/// simultaneous handshakes for one identity resolve as last-upsert-wins.
#[derive(Debug)]
pub struct ConnectionRegistry {
    /// identity → live connection.
    connections: DashMap<Uuid, Arc<ConnectionHandle>>,
    /// Identities in the management broadcast group.
    management: DashSet<Uuid>,
    /// Outbound buffer size per connection.
    buffer_size: usize,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    pub fn new(buffer_size: usize) -> Self {
        Self {
            connections: DashMap::new(),
            management: DashSet::new(),
            buffer_size,
        }
    }

    /// Registers an authenticated connection for an identity.
    ///
    /// Returns the handle and the receiver half the socket task drains.
    /// Non-guest roles join the management group immediately; guests
    /// never do.
    pub fn register(
        &self,
        identity_id: Uuid,
        role: Role,
        name: String,
    ) -> (Arc<ConnectionHandle>, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(self.buffer_size);
        let handle = Arc::new(ConnectionHandle::new(identity_id, role, name, tx));

        if let Some(previous) = self.connections.insert(identity_id, handle.clone()) {
            debug!(
                identity_id = %identity_id,
                superseded = %previous.id,
                "Existing connection superseded"
            );
        }

        if role.is_staff() {
            self.management.insert(identity_id);
        }

        info!(
            conn_id = %handle.id,
            identity_id = %identity_id,
            role = %role,
            "Realtime connection registered"
        );

        (handle, rx)
    }

    /// Pushes an event to one identity's live connection.
    ///
    /// A no-op when the identity has no live connection; nothing is
    /// queued for later delivery.
    pub fn notify(&self, identity_id: Uuid, event: &RealtimeEvent) {
        let Some(handle) = self.connections.get(&identity_id) else {
            debug!(identity_id = %identity_id, event = event.name(), "Notify with no live connection");
            return;
        };

        match encode_event(event) {
            Ok(frame) => {
                if !handle.push(frame) {
                    warn!(identity_id = %identity_id, event = event.name(), "Notify dropped");
                }
            }
            Err(e) => warn!(error = %e, "Failed to encode event"),
        }
    }

    /// Broadcasts an event to every management-group member with a live
    /// connection.
    pub fn broadcast(&self, event: &RealtimeEvent) {
        let frame = match encode_event(event) {
            Ok(f) => f,
            Err(e) => {
                warn!(error = %e, "Failed to encode broadcast event");
                return;
            }
        };

        let mut delivered = 0usize;
        for member in self.management.iter() {
            if let Some(handle) = self.connections.get(&*member)
                && handle.push(frame.clone())
            {
                delivered += 1;
            }
        }

        debug!(event = event.name(), delivered, "Broadcast to management group");
    }

    /// Records a disconnection.
    ///
    /// Deliberately log-only: the stale record is replaced on the
    /// identity's next handshake, or orphaned for the process lifetime.
    pub fn disconnected(&self, handle: &ConnectionHandle) {
        handle.mark_closed();
        info!(
            conn_id = %handle.id,
            identity_id = %handle.identity_id,
            "Realtime connection closed"
        );
    }

    /// Whether an identity currently has a registered connection.
    pub fn is_connected(&self, identity_id: Uuid) -> bool {
        self.connections.contains_key(&identity_id)
    }

    /// The connection currently bound to an identity, if any.
    pub fn connection_for(&self, identity_id: Uuid) -> Option<ConnectionId> {
        self.connections.get(&identity_id).map(|h| h.id)
    }

    /// Whether an identity is in the management broadcast group.
    pub fn in_management_group(&self, identity_id: Uuid) -> bool {
        self.management.contains(&identity_id)
    }

    /// Number of registered connections.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesa_core::events::{OrderStatus, OrderUpdate};

    fn registry() -> ConnectionRegistry {
        ConnectionRegistry::new(16)
    }

    fn order_event(guest_id: Uuid) -> RealtimeEvent {
        RealtimeEvent::UpdateOrder(OrderUpdate {
            order_id: Uuid::new_v4(),
            guest_id,
            table_number: 4,
            status: OrderStatus::Pending,
            dish_name: "Bun cha".to_string(),
            quantity: 1,
        })
    }

    #[test]
    fn test_upsert_binds_second_connection() {
        let reg = registry();
        let id = Uuid::new_v4();

        let (first, mut first_rx) = reg.register(id, Role::Guest, "t-4".to_string());
        let (second, mut second_rx) = reg.register(id, Role::Guest, "t-4".to_string());

        assert_eq!(reg.connection_count(), 1);
        assert_eq!(reg.connection_for(id), Some(second.id));
        assert_ne!(first.id, second.id);

        // Notify reaches only the currently-bound connection.
        reg.notify(id, &order_event(id));
        assert!(second_rx.try_recv().is_ok());
        assert!(first_rx.try_recv().is_err());
    }

    #[test]
    fn test_notify_unknown_identity_is_noop() {
        let reg = registry();
        reg.notify(Uuid::new_v4(), &RealtimeEvent::RefreshToken);
    }

    #[test]
    fn test_guest_never_in_management_group() {
        let reg = registry();
        let guest = Uuid::new_v4();
        let (_handle, _rx) = reg.register(guest, Role::Guest, "t-9".to_string());
        assert!(!reg.in_management_group(guest));
    }

    #[test]
    fn test_staff_joins_management_group_immediately() {
        let reg = registry();
        let owner = Uuid::new_v4();
        let employee = Uuid::new_v4();
        let (_h1, _r1) = reg.register(owner, Role::Owner, "boss".to_string());
        let (_h2, _r2) = reg.register(employee, Role::Employee, "an".to_string());
        assert!(reg.in_management_group(owner));
        assert!(reg.in_management_group(employee));
    }

    #[test]
    fn test_broadcast_reaches_management_only() {
        let reg = registry();
        let owner = Uuid::new_v4();
        let guest = Uuid::new_v4();
        let (_h1, mut owner_rx) = reg.register(owner, Role::Owner, "boss".to_string());
        let (_h2, mut guest_rx) = reg.register(guest, Role::Guest, "t-1".to_string());

        reg.broadcast(&order_event(guest));

        assert!(owner_rx.try_recv().is_ok());
        assert!(guest_rx.try_recv().is_err());
    }

    #[test]
    fn test_superseded_connection_not_closed() {
        let reg = registry();
        let id = Uuid::new_v4();
        let (first, _first_rx) = reg.register(id, Role::Employee, "an".to_string());
        let (_second, _second_rx) = reg.register(id, Role::Employee, "an".to_string());

        // The registry forgets the first handle but does not close it.
        assert!(first.is_alive());
    }
}
