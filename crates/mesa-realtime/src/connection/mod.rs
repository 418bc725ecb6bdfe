//! Connection lifecycle: handshake auth, handles, and the registry.

pub mod authenticator;
pub mod handle;
pub mod registry;
