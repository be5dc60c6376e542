//! Sequential batch submission
//!
//! Drives one bulk operation: partitions the selection snapshot into
//! descriptor-sized chunks and dispatches them strictly in order. Chunk
//! N+1 never starts before chunk N's response has been folded into the
//! job, so remote-side effects keep selection order within a run.
//! Failures are collected, not fatal; cancellation is honored only at
//! chunk boundaries.

use super::pacer::{FixedDelayPacer, NoDelayPacer, Pacer};
use super::transport::BulkTransport;
use super::types::{ActiveJobGuard, BulkJob, CancelHandle};
use crate::core::action::BulkAction;
use crate::core::progress::{ProgressReporter, ProgressUpdate};
use crate::core::record::RecordId;
use crate::core::registry::{OperationDescriptor, OperationRegistry};
use crate::utils::error::{BulkError, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Submits bulk operations chunk by chunk
pub struct BatchSubmitter<T: BulkTransport> {
    transport: Arc<T>,
    registry: Arc<OperationRegistry>,
    pacer_override: Option<Arc<dyn Pacer>>,
    guard: ActiveJobGuard,
    max_consecutive_failures: Option<u32>,
}

impl<T: BulkTransport> BatchSubmitter<T> {
    /// Create a submitter over the production registry
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            registry: OperationRegistry::shared(),
            pacer_override: None,
            guard: ActiveJobGuard::new(),
            max_consecutive_failures: None,
        }
    }

    /// Use a custom descriptor table
    pub fn with_registry(mut self, registry: Arc<OperationRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the per-descriptor pacing with a fixed strategy
    pub fn with_pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacer_override = Some(pacer);
        self
    }

    /// Stop starting new chunks after this many consecutive wholly-failed
    /// chunks; the run then finishes as cancelled. Disabled by default.
    pub fn with_max_consecutive_failures(mut self, threshold: Option<u32>) -> Self {
        self.max_consecutive_failures = threshold;
        self
    }

    /// Whether a run currently holds the active slot
    pub fn is_busy(&self) -> bool {
        self.guard.is_busy()
    }

    /// Run one bulk operation over a selection snapshot.
    ///
    /// Rejected up front, with no job created: empty selections, kinds the
    /// registry does not know, and invocations while another run is
    /// active. Everything past that point is best-effort; the returned
    /// job always carries the full success/failure tally.
    pub async fn run(
        &self,
        records: Vec<RecordId>,
        action: BulkAction,
        reporter: &dyn ProgressReporter,
        cancel: &CancelHandle,
    ) -> Result<BulkJob> {
        if records.is_empty() {
            return Err(BulkError::empty_selection(format!(
                "{} invoked with no records selected",
                action.kind()
            )));
        }
        let descriptor = self.registry.resolve(action.kind())?;
        let _permit = self.guard.try_acquire().ok_or_else(|| {
            BulkError::in_progress(format!(
                "{} rejected: another bulk operation is still running",
                action.kind()
            ))
        })?;

        let mut job = BulkJob::new(action.kind(), records.len());
        let pacer = self.effective_pacer(descriptor);
        info!(
            "Starting {} over {} records in chunks of {}",
            job.kind,
            job.total,
            descriptor.batch_size.min(job.total)
        );

        let mut consecutive_failures = 0u32;
        let mut cancelled = false;

        for (index, chunk) in records.chunks(descriptor.batch_size).enumerate() {
            if cancel.is_cancelled() {
                info!("{} cancelled after {} of {} records", job.kind, job.completed, job.total);
                cancelled = true;
                break;
            }
            if index > 0 {
                pacer.pause().await;
            }

            debug!("Dispatching chunk {} ({} records)", index + 1, chunk.len());
            let outcome = self.transport.dispatch_chunk(descriptor, &action, chunk).await;

            if outcome.is_total_failure() {
                consecutive_failures += 1;
                warn!(
                    "Chunk {} failed for all {} records: {}",
                    index + 1,
                    chunk.len(),
                    outcome.failures[0].message
                );
            } else {
                consecutive_failures = 0;
            }

            job.record_chunk(outcome.succeeded.len(), outcome.failures);
            reporter.report(&ProgressUpdate {
                completed: job.completed,
                total: job.total,
                succeeded: job.succeeded,
                failed: job.failed(),
                message: format!("Processed {} of {} records", job.completed, job.total),
            });

            if let Some(threshold) = self.max_consecutive_failures {
                if consecutive_failures >= threshold {
                    warn!(
                        "{} stopped: {} consecutive chunks failed",
                        job.kind, consecutive_failures
                    );
                    cancelled = true;
                    break;
                }
            }
        }

        job.finish(cancelled);
        reporter.report(&ProgressUpdate {
            completed: job.completed,
            total: job.total,
            succeeded: job.succeeded,
            failed: job.failed(),
            message: job.summary(),
        });
        info!("{}", job.summary());

        Ok(job)
    }

    fn effective_pacer(&self, descriptor: &OperationDescriptor) -> Arc<dyn Pacer> {
        if let Some(pacer) = &self.pacer_override {
            return pacer.clone();
        }
        match descriptor.pause_between {
            Some(delay) => Arc::new(FixedDelayPacer::new(delay)),
            None => Arc::new(NoDelayPacer),
        }
    }
}
