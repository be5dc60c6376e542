//! End-to-end tests against a real deployment
//!
//! Run with `cargo test -- --ignored` and `BULKHUB_BASE_URL` (plus
//! `BULKHUB_CSRF_TOKEN` when the deployment enforces it) pointing at a
//! disposable environment.

pub mod live_server;
