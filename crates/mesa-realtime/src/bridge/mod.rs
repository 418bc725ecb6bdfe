//! Bridges the core event bus onto live connections.

pub mod event_bridge;

pub use event_bridge::EventBridge;
