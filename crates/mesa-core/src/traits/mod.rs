//! Core traits defined in `mesa-core` and implemented by collaborators.

pub mod identity;

pub use identity::{GuestLogin, IdentityProvider, LoginCredentials};
