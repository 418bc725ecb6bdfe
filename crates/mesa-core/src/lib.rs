//! # mesa-core
//!
//! Core crate for the Mesa restaurant platform. Contains configuration
//! schemas, identity and role types, domain events, the realtime event
//! contract, collaborator traits, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Mesa crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
