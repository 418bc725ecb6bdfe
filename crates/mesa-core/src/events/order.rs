//! Order-related domain events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Order lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum OrderStatus {
    /// Placed by the guest, not yet acknowledged.
    Pending,
    /// Being prepared by the kitchen.
    Processing,
    /// Rejected by staff.
    Rejected,
    /// Served to the table.
    Delivered,
    /// Paid and closed.
    Paid,
}

/// The order snapshot pushed over the realtime channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderUpdate {
    /// Order ID.
    pub order_id: Uuid,
    /// The guest who placed the order.
    pub guest_id: Uuid,
    /// Table the order belongs to.
    pub table_number: u32,
    /// Current status.
    pub status: OrderStatus,
    /// Dish name, denormalized for display.
    pub dish_name: String,
    /// Ordered quantity.
    pub quantity: u32,
}

/// Events related to orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OrderEvent {
    /// A guest placed a new order.
    Placed {
        /// Snapshot of the placed order.
        update: OrderUpdate,
    },
    /// Staff changed an order's status.
    StatusChanged {
        /// Snapshot after the change.
        update: OrderUpdate,
        /// The staff member who made the change.
        changed_by: Uuid,
    },
}

impl OrderEvent {
    /// The order snapshot carried by this event.
    pub fn update(&self) -> &OrderUpdate {
        match self {
            Self::Placed { update } => update,
            Self::StatusChanged { update, .. } => update,
        }
    }
}
