//! # mesa-client
//!
//! Client-side session upkeep for Mesa: an in-memory token store, a
//! transport seam over the business API's refresh endpoint, and the
//! refresh scheduler that rotates token pairs just in time.

pub mod scheduler;
pub mod store;
pub mod transport;

pub use scheduler::{RefreshOutcome, RefreshScheduler, SchedulerEvent};
pub use store::TokenStore;
pub use transport::{HttpRefreshTransport, RefreshTransport};
