//! # mesa-realtime
//!
//! Real-time engine for Mesa. Provides:
//!
//! - Handshake authentication with mandatory signature verification
//! - A registry binding one live connection per identity (last upsert wins)
//! - The management broadcast group for non-guest roles
//! - Targeted `notify` and group `broadcast` push primitives
//! - A bridge consuming domain events from the core event bus

pub mod bridge;
pub mod connection;
pub mod message;

pub use bridge::EventBridge;
pub use connection::authenticator::{AuthenticatedConnection, HandshakeAuthenticator};
pub use connection::handle::{ConnectionHandle, ConnectionId};
pub use connection::registry::ConnectionRegistry;
