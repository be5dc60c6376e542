//! Progress reporting
//!
//! `ProgressView` is a pure projection of a `BulkJob`; every presentation
//! concern (progress bar width, status line, error log, button states)
//! derives from it and nothing here holds business state. The
//! `ProgressReporter` trait is the single adapter seam for whatever
//! surface displays the run.

use crate::core::batch::{BulkJob, JobStatus};
use parking_lot::Mutex;
use tracing::{info, warn};

/// Snapshot handed to the reporter after every processed chunk
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    /// Records processed so far
    pub completed: usize,
    /// Records in the selection
    pub total: usize,
    /// Records accepted so far
    pub succeeded: usize,
    /// Records failed so far
    pub failed: usize,
    /// Status message for the current step
    pub message: String,
}

impl ProgressUpdate {
    /// Completion percentage, 0-100
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.completed * 100) / self.total) as u8
    }
}

/// Receives progress updates; the one presentation adapter
pub trait ProgressReporter: Send + Sync {
    fn report(&self, update: &ProgressUpdate);
}

/// Closures are reporters
impl<F> ProgressReporter for F
where
    F: Fn(&ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: &ProgressUpdate) {
        self(update)
    }
}

/// Discards updates
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl ProgressReporter for NullReporter {
    fn report(&self, _update: &ProgressUpdate) {}
}

/// Reports through `tracing`, throttled to whole-percent changes so a
/// large selection does not flood the log. Failure growth always logs.
#[derive(Debug, Default)]
pub struct LogReporter {
    last: Mutex<Option<(u8, usize)>>,
}

impl LogReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for LogReporter {
    fn report(&self, update: &ProgressUpdate) {
        let percent = update.percent();
        let mut last = self.last.lock();
        let (last_percent, last_failed) = last.unwrap_or((u8::MAX, 0));

        if update.failed > last_failed {
            warn!(
                "{} ({}%, {} succeeded, {} failed)",
                update.message, percent, update.succeeded, update.failed
            );
        } else if last_percent != percent {
            info!(
                "{} ({}%, {} succeeded)",
                update.message, percent, update.succeeded
            );
        }
        *last = Some((percent, update.failed));
    }
}

/// Pure projection of a job for the hosting view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressView {
    /// Progress bar width, 0-100
    pub percent: u8,
    /// Textual status line
    pub status_line: String,
    /// Success counter
    pub succeeded: usize,
    /// Error counter
    pub failed: usize,
    /// Error log lines, append-only across renders of the same job
    pub error_log: Vec<String>,
    /// Cancel affordance enabled while the job is live
    pub cancel_enabled: bool,
    /// Close affordance enabled once the job is terminal
    pub close_enabled: bool,
}

impl ProgressView {
    /// Project a job; holds no state of its own
    pub fn project(job: &BulkJob) -> Self {
        let status_line = match job.status {
            JobStatus::InProgress => {
                format!("Processing {} of {} records", job.completed, job.total)
            }
            _ => job.summary(),
        };
        Self {
            percent: job.percent_complete(),
            status_line,
            succeeded: job.succeeded,
            failed: job.failed(),
            error_log: job
                .failures
                .iter()
                .map(|f| format!("record {}: {}", f.record, f.message))
                .collect(),
            cancel_enabled: !job.is_terminal(),
            close_enabled: job.is_terminal(),
        }
    }
}
