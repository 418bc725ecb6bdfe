//! Payment-related domain events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payment confirmation pushed over the realtime channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentNotice {
    /// The guest whose orders were settled.
    pub guest_id: Uuid,
    /// The orders covered by this payment.
    pub order_ids: Vec<Uuid>,
    /// Total amount in minor currency units.
    pub amount: i64,
    /// When the payment was confirmed.
    pub paid_at: DateTime<Utc>,
}

/// Events related to payments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PaymentEvent {
    /// A guest's outstanding orders were paid.
    Confirmed {
        /// The confirmation details.
        notice: PaymentNotice,
        /// The staff member who recorded the payment.
        confirmed_by: Uuid,
    },
}
