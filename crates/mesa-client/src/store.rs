//! In-memory storage for the current token pair.

use tokio::sync::RwLock;

use mesa_auth::TokenPair;

/// Holds the token pair for one authenticated session.
///
/// Owned by the scheduler's session, not shared global state: the store
/// lives and dies with the page/session that created it.
#[derive(Debug, Default)]
pub struct TokenStore {
    pair: RwLock<Option<TokenPair>>,
}

impl TokenStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current pair, if any.
    pub async fn get(&self) -> Option<TokenPair> {
        self.pair.read().await.clone()
    }

    /// Replaces the stored pair wholesale. A pair is always persisted
    /// together; tokens are never updated independently.
    pub async fn set(&self, pair: TokenPair) {
        *self.pair.write().await = Some(pair);
    }

    /// Purges the stored pair.
    pub async fn clear(&self) {
        *self.pair.write().await = None;
    }

    /// Whether a pair is currently stored.
    pub async fn is_empty(&self) -> bool {
        self.pair.read().await.is_none()
    }
}
