//! Batch job types and data structures

use crate::core::record::RecordId;
use crate::core::registry::OperationKind;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

/// One record that could not be updated
#[derive(Debug, Clone, Serialize)]
pub struct ItemFailure {
    /// The record the failure is scoped to
    pub record: RecordId,
    /// Human-readable failure message
    pub message: String,
}

impl ItemFailure {
    pub fn new(record: RecordId, message: impl Into<String>) -> Self {
        Self {
            record,
            message: message.into(),
        }
    }
}

/// Batch job status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Chunks are still being processed
    InProgress,
    /// Every chunk processed
    Completed,
    /// Stopped at a chunk boundary before all chunks processed
    Cancelled,
}

/// One in-flight (or finished) bulk operation
///
/// Invariants, held after every mutation:
/// `completed == succeeded + failures.len()` and `completed <= total`.
/// A terminal job is never mutated again.
#[derive(Debug, Clone, Serialize)]
pub struct BulkJob {
    /// Job id
    pub id: Uuid,
    /// Operation kind
    pub kind: OperationKind,
    /// Records in the selection snapshot
    pub total: usize,
    /// Records whose chunk has been processed, success or not
    pub completed: usize,
    /// Records the remote service accepted
    pub succeeded: usize,
    /// Per-record failures, in processing order
    pub failures: Vec<ItemFailure>,
    /// Job status
    pub status: JobStatus,
    /// Creation timestamp
    pub started_at: DateTime<Utc>,
    /// Terminal timestamp
    pub finished_at: Option<DateTime<Utc>>,
}

impl BulkJob {
    /// Create a job over a selection of `total` records
    pub fn new(kind: OperationKind, total: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            total,
            completed: 0,
            succeeded: 0,
            failures: Vec::new(),
            status: JobStatus::InProgress,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Failed record count
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Whether the job reached a terminal status
    pub fn is_terminal(&self) -> bool {
        self.status != JobStatus::InProgress
    }

    /// Completion percentage, 0-100
    pub fn percent_complete(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.completed * 100) / self.total) as u8
    }

    /// Fold one processed chunk into the tally
    pub(crate) fn record_chunk(&mut self, succeeded: usize, failures: Vec<ItemFailure>) {
        if self.is_terminal() {
            return;
        }
        self.completed += succeeded + failures.len();
        self.succeeded += succeeded;
        self.failures.extend(failures);
        debug_assert!(self.completed <= self.total);
        debug_assert_eq!(self.completed, self.succeeded + self.failures.len());
    }

    /// Move the job to its terminal status
    pub(crate) fn finish(&mut self, cancelled: bool) {
        if self.is_terminal() {
            return;
        }
        self.status = if cancelled {
            JobStatus::Cancelled
        } else {
            JobStatus::Completed
        };
        self.finished_at = Some(Utc::now());
    }

    /// Final summary line; partial failure is always visible
    pub fn summary(&self) -> String {
        let outcome = match self.status {
            JobStatus::InProgress => "in progress",
            JobStatus::Completed => "completed",
            JobStatus::Cancelled => "cancelled",
        };
        if self.failures.is_empty() {
            format!(
                "{} {}: {} of {} records succeeded",
                self.kind, outcome, self.succeeded, self.total
            )
        } else {
            format!(
                "{} {} with {} errors: {} of {} records succeeded",
                self.kind,
                outcome,
                self.failures.len(),
                self.succeeded,
                self.total
            )
        }
    }
}

/// Cooperative cancellation handle
///
/// Cancelling only stops new chunks from starting; a chunk already
/// dispatched always runs to completion.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation at the next chunk boundary
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Check whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Single-active-job guard
///
/// Invoking a second bulk operation while one is running is rejected; the
/// permit releases the slot when dropped, whatever way the run exits.
#[derive(Debug, Clone, Default)]
pub struct ActiveJobGuard(Arc<AtomicBool>);

impl ActiveJobGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to claim the active slot
    pub fn try_acquire(&self) -> Option<JobPermit> {
        self.0
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| JobPermit(self.0.clone()))
    }

    /// Whether a job currently holds the slot
    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// RAII permit for the active-job slot
#[derive(Debug)]
pub struct JobPermit(Arc<AtomicBool>);

impl Drop for JobPermit {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
