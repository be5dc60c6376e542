//! Configuration management
//!
//! Loaded once at startup from a YAML file or the environment; validated
//! before anything touches the network.

use crate::utils::error::{BulkError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};
use url::Url;

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Batch submission settings
    #[serde(default)]
    pub batch: BatchSettings,
}

/// Remote API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the admin deployment
    pub base_url: String,
    /// Anti-forgery token supplied by the host; sent as `X-CSRFToken`
    #[serde(default)]
    pub csrf_token: Option<String>,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            csrf_token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Batch submission settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSettings {
    /// Pause between per-record stock adjustment requests, milliseconds
    #[serde(default = "default_stock_adjust_pause_ms")]
    pub stock_adjust_pause_ms: u64,
    /// Stop a run after this many consecutive wholly-failed chunks;
    /// unset keeps the run going whatever happens
    #[serde(default)]
    pub max_consecutive_failures: Option<u32>,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            stock_adjust_pause_ms: default_stock_adjust_pause_ms(),
            max_consecutive_failures: None,
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_stock_adjust_pause_ms() -> u64 {
    100
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| BulkError::config(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| BulkError::config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Config::default();
        if let Ok(base_url) = std::env::var("BULKHUB_BASE_URL") {
            config.api.base_url = base_url;
        }
        if let Ok(token) = std::env::var("BULKHUB_CSRF_TOKEN") {
            config.api.csrf_token = Some(token);
        }
        if let Ok(timeout) = std::env::var("BULKHUB_TIMEOUT_SECS") {
            config.api.timeout_secs = timeout
                .parse()
                .map_err(|_| BulkError::config("BULKHUB_TIMEOUT_SECS must be an integer"))?;
        }
        if let Ok(pause) = std::env::var("BULKHUB_STOCK_ADJUST_PAUSE_MS") {
            config.batch.stock_adjust_pause_ms = pause
                .parse()
                .map_err(|_| BulkError::config("BULKHUB_STOCK_ADJUST_PAUSE_MS must be an integer"))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.api.base_url)
            .map_err(|e| BulkError::config(format!("Invalid base URL '{}': {}", self.api.base_url, e)))?;
        if self.api.timeout_secs == 0 {
            return Err(BulkError::config("Request timeout must be non-zero"));
        }
        if self.batch.max_consecutive_failures == Some(0) {
            return Err(BulkError::config(
                "max_consecutive_failures must be at least 1 when set",
            ));
        }
        Ok(())
    }
}
