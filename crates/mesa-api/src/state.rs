//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use mesa_auth::{RotationService, TokenIssuer, TokenVerifier};
use mesa_core::config::AppConfig;
use mesa_core::events::EventBus;
use mesa_core::traits::IdentityProvider;
use mesa_realtime::{ConnectionRegistry, HandshakeAuthenticator};

use crate::middleware::gate::Gatekeeper;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,

    // ── Token service ────────────────────────────────────────
    /// Token pair issuer.
    pub issuer: Arc<TokenIssuer>,
    /// Token verifier (signed verify + unsigned decode).
    pub verifier: Arc<TokenVerifier>,
    /// Pair rotation service.
    pub rotation: Arc<RotationService>,

    // ── Edge ─────────────────────────────────────────────────
    /// Request gate evaluated on every page request.
    pub gatekeeper: Arc<Gatekeeper>,

    // ── Realtime ─────────────────────────────────────────────
    /// Handshake authenticator.
    pub authenticator: Arc<HandshakeAuthenticator>,
    /// Live connection registry.
    pub registry: Arc<ConnectionRegistry>,
    /// Domain event bus.
    pub event_bus: EventBus,

    // ── Collaborators ────────────────────────────────────────
    /// The business API that authenticates principals.
    pub identity_provider: Arc<dyn IdentityProvider>,
}

impl AppState {
    /// Wires a full state from configuration and an identity provider.
    pub fn new(config: AppConfig, identity_provider: Arc<dyn IdentityProvider>) -> Self {
        let issuer = Arc::new(TokenIssuer::new(&config.auth));
        let verifier = Arc::new(TokenVerifier::new(&config.auth));
        let rotation = Arc::new(RotationService::new(
            issuer.as_ref().clone(),
            verifier.as_ref().clone(),
        ));
        let gatekeeper = Arc::new(Gatekeeper::new(Arc::clone(&verifier)));
        let authenticator = Arc::new(HandshakeAuthenticator::new(Arc::clone(&verifier)));
        let registry = Arc::new(ConnectionRegistry::new(config.realtime.channel_buffer_size));
        let event_bus = EventBus::default();

        Self {
            config: Arc::new(config),
            issuer,
            verifier,
            rotation,
            gatekeeper,
            authenticator,
            registry,
            event_bus,
            identity_provider,
        }
    }
}
