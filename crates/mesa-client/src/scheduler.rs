//! The refresh scheduler: rotates the token pair just in time.
//!
//! Two states, idle and refreshing, guarded by a single atomic flag.
//! Triggers arrive from three places: the periodic cadence, navigation
//! into an authenticated area, and a server-pushed `refresh-token` event
//! (which forces rotation). A trigger observed while a refresh is in
//! flight is dropped, never queued.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use mesa_auth::{decode_unverified, needs_rotation};
use mesa_core::config::ClientConfig;

use crate::store::TokenStore;
use crate::transport::RefreshTransport;

/// Paths where the scheduler must not run.
const UNAUTHENTICATED_PATHS: &[&str] = &["/login", "/logout", "/refresh-token"];

/// What a single trigger evaluation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new pair was fetched and stored.
    Rotated,
    /// Nothing to do: no pair stored, or the rotation policy not met.
    Skipped,
    /// A refresh was already in flight; this trigger was dropped.
    Busy,
    /// Terminal: refresh token expired or rejected. Tokens purged,
    /// periodic timer cancelled.
    SessionEnded,
    /// The rotation call failed in transit. Tokens kept; the next
    /// scheduled tick or navigation retries.
    TransportFailed,
}

/// Events surfaced to the UI collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerEvent {
    /// A rotation succeeded; the stored pair is fresh.
    Rotated,
    /// The session ended; the consumer should redirect to login.
    SessionEnded,
}

/// Client-side rotation driver for one authenticated session.
#[derive(Debug)]
pub struct RefreshScheduler {
    store: Arc<TokenStore>,
    transport: Arc<dyn RefreshTransport>,
    /// The refresh guard. Compare-exchange on this flag is the only
    /// transition into the refreshing state.
    refreshing: Arc<AtomicBool>,
    cadence: Duration,
    cooldown: Duration,
    cancel: CancellationToken,
    events: mpsc::UnboundedSender<SchedulerEvent>,
}

impl RefreshScheduler {
    /// Creates a scheduler and the event stream its consumer drains.
    pub fn new(
        config: &ClientConfig,
        store: Arc<TokenStore>,
        transport: Arc<dyn RefreshTransport>,
    ) -> (Self, mpsc::UnboundedReceiver<SchedulerEvent>) {
        let (events, events_rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            store,
            transport,
            refreshing: Arc::new(AtomicBool::new(false)),
            cadence: Duration::from_secs(config.refresh_cadence_seconds),
            cooldown: Duration::from_millis(config.guard_cooldown_ms),
            cancel: CancellationToken::new(),
            events,
        };
        (scheduler, events_rx)
    }

    /// Spawns the periodic cadence task.
    ///
    /// The first tick fires immediately; the task ends when the
    /// scheduler is stopped (navigation away or terminal failure).
    pub fn spawn(self: &Arc<Self>) -> JoinHandle<()> {
        let scheduler = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(scheduler.cadence);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = scheduler.cancel.cancelled() => break,
                    _ = interval.tick() => {
                        scheduler.check_and_refresh(false).await;
                    }
                }
            }
            debug!("Refresh cadence stopped");
        })
    }

    /// Navigation trigger.
    ///
    /// Navigating into an unauthenticated area tears the scheduler down;
    /// any other path evaluates the rotation policy.
    pub async fn trigger_navigation(&self, path: &str) -> RefreshOutcome {
        if UNAUTHENTICATED_PATHS.iter().any(|p| path.starts_with(p)) {
            self.stop();
            return RefreshOutcome::Skipped;
        }
        self.check_and_refresh(false).await
    }

    /// Server-push trigger: force rotation regardless of remaining
    /// lifetime. Wired to the `refresh-token` realtime event.
    pub async fn trigger_forced(&self) -> RefreshOutcome {
        self.check_and_refresh(true).await
    }

    /// Evaluates the rotation policy and rotates if due.
    pub async fn check_and_refresh(&self, force: bool) -> RefreshOutcome {
        if self.cancel.is_cancelled() {
            return RefreshOutcome::Skipped;
        }

        // Single-slot guard: only one refresh is ever in flight. Losers
        // are dropped, not queued.
        if self
            .refreshing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return RefreshOutcome::Busy;
        }

        let outcome = self.refresh_guarded(force).await;

        match outcome {
            RefreshOutcome::Rotated => {
                // Hold the guard through a short cooldown so a burst of
                // near-simultaneous triggers collapses into this rotation.
                let guard = Arc::clone(&self.refreshing);
                let cooldown = self.cooldown;
                tokio::spawn(async move {
                    tokio::time::sleep(cooldown).await;
                    guard.store(false, Ordering::SeqCst);
                });
            }
            _ => self.refreshing.store(false, Ordering::SeqCst),
        }

        outcome
    }

    /// The refreshing state proper. Caller holds the guard.
    async fn refresh_guarded(&self, force: bool) -> RefreshOutcome {
        let Some(pair) = self.store.get().await else {
            return RefreshOutcome::Skipped;
        };

        let refresh_claims = match decode_unverified(&pair.refresh_token) {
            Ok(claims) => claims,
            Err(e) => {
                warn!(error = %e, "Stored refresh token undecodable");
                return self.end_session().await;
            }
        };

        let now = Utc::now();

        // A refresh token past its own expiry ends the session locally.
        // No network call is attempted.
        if refresh_claims.is_expired_at(now) {
            info!("Refresh token expired, ending session");
            return self.end_session().await;
        }

        if !force {
            let access_claims = match decode_unverified(&pair.access_token) {
                Ok(claims) => claims,
                Err(e) => {
                    warn!(error = %e, "Stored access token undecodable");
                    return self.end_session().await;
                }
            };
            if !needs_rotation(&access_claims, now) {
                return RefreshOutcome::Skipped;
            }
        }

        match self.transport.refresh(&pair.refresh_token).await {
            Ok(new_pair) => {
                self.store.set(new_pair).await;
                debug!("Token pair rotated");
                let _ = self.events.send(SchedulerEvent::Rotated);
                RefreshOutcome::Rotated
            }
            Err(e) if e.is_token_rejection() => {
                info!(error = %e, "Server rejected refresh token, ending session");
                self.end_session().await
            }
            Err(e) => {
                // Transient: keep the pair, retry on the next trigger.
                warn!(error = %e, "Rotation failed in transit");
                RefreshOutcome::TransportFailed
            }
        }
    }

    /// Terminal teardown: purge tokens, cancel the timer, tell the UI.
    async fn end_session(&self) -> RefreshOutcome {
        self.store.clear().await;
        self.cancel.cancel();
        let _ = self.events.send(SchedulerEvent::SessionEnded);
        RefreshOutcome::SessionEnded
    }

    /// Cancels the periodic timer. Idempotent; no trigger fires after.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Whether the scheduler has been stopped.
    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
