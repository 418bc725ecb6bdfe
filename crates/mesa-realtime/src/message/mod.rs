//! Wire framing for the realtime channel.

pub mod wire;

pub use wire::HandshakeFrame;
