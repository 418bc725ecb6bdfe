//! Client-side refresh scheduler configuration.

use serde::{Deserialize, Serialize};

/// Refresh scheduler settings used by `mesa-client`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Fixed cadence between rotation checks, in seconds.
    #[serde(default = "default_refresh_cadence")]
    pub refresh_cadence_seconds: u64,
    /// Cooldown held after a successful rotation before the guard is
    /// released, in milliseconds. Absorbs bursts of near-simultaneous
    /// triggers.
    #[serde(default = "default_guard_cooldown")]
    pub guard_cooldown_ms: u64,
    /// Base URL of the business API.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            refresh_cadence_seconds: default_refresh_cadence(),
            guard_cooldown_ms: default_guard_cooldown(),
            backend_url: default_backend_url(),
        }
    }
}

fn default_refresh_cadence() -> u64 {
    600
}

fn default_guard_cooldown() -> u64 {
    1000
}

fn default_backend_url() -> String {
    "http://localhost:4000".to_string()
}
