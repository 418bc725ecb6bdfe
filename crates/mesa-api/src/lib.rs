//! # mesa-api
//!
//! HTTP surface for Mesa built on Axum.
//!
//! Provides the edge gatekeeper middleware, auth endpoints (login, guest
//! login, refresh, logout), the WebSocket upgrade with handshake
//! authentication, DTOs, and error mapping.

pub mod app;
pub mod directory;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::AppState;
