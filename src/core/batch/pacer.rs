//! Request pacing between chunk dispatches
//!
//! The pacing strategy is a seam so the fixed-delay behavior can be
//! swapped (or zeroed out in tests) without touching the batching
//! contract. The pause applies between consecutive dispatches, never
//! before the first.

use async_trait::async_trait;
use std::time::Duration;

/// Paces consecutive chunk dispatches
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Wait before the next dispatch
    async fn pause(&self);
}

/// Fixed-delay pacing
#[derive(Debug, Clone)]
pub struct FixedDelayPacer {
    delay: Duration,
}

impl FixedDelayPacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl Pacer for FixedDelayPacer {
    async fn pause(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

/// No pacing between dispatches
#[derive(Debug, Clone, Default)]
pub struct NoDelayPacer;

#[async_trait]
impl Pacer for NoDelayPacer {
    async fn pause(&self) {}
}
