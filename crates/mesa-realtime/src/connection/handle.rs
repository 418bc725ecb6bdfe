//! Individual realtime connection handle.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

use mesa_core::types::Role;

/// Unique connection identifier.
pub type ConnectionId = Uuid;

/// A handle to a single live connection.
///
/// Holds the sender half for pushing frames to the client plus metadata
/// about the connected identity. The socket task owns the receiver half.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection ID.
    pub id: ConnectionId,
    /// Identity this connection belongs to.
    pub identity_id: Uuid,
    /// Role at handshake time.
    pub role: Role,
    /// Display name, cached for logging.
    pub name: String,
    /// When the connection was established.
    pub connected_at: DateTime<Utc>,
    /// Sender for outbound frames.
    sender: mpsc::Sender<String>,
    /// Whether the connection is still live.
    alive: AtomicBool,
}

impl ConnectionHandle {
    /// Creates a handle over the given sender.
    pub fn new(identity_id: Uuid, role: Role, name: String, sender: mpsc::Sender<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            identity_id,
            role,
            name,
            connected_at: Utc::now(),
            sender,
            alive: AtomicBool::new(true),
        }
    }

    /// Pushes a frame to this connection, fire-and-forget.
    ///
    /// Returns `false` when the frame was dropped (connection dead or
    /// buffer full). Frames are never queued for later delivery.
    pub fn push(&self, frame: String) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.sender.try_send(frame) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(conn_id = %self.id, "Send buffer full, dropping frame");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_closed();
                false
            }
        }
    }

    /// Whether the connection is still live.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Marks the connection closed. Idempotent.
    pub fn mark_closed(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}
