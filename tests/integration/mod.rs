//! Integration tests for bulkhub-rs
//!
//! Full engine runs against a wiremock double of the admin API.

pub mod bulk_update_tests;
pub mod export_tests;
pub mod stock_adjust_tests;
