//! Common test utilities for bulkhub-rs

pub mod assertions;
pub mod fixtures;

pub use fixtures::{client_for, int_ids, update_action, CSRF_TOKEN};

/// Skip test if environment variable is not set
#[macro_export]
macro_rules! skip_without_env {
    ($var:expr) => {
        if std::env::var($var).is_err() {
            eprintln!("Skipping test: {} environment variable not set", $var);
            return;
        }
    };
}
