//! Integration tests driving the real router.

mod auth_test;
mod client_flow_test;
mod gate_test;
mod helpers;
mod realtime_test;
