//! Transport seam between the submitter and the remote service
//!
//! The submitter never sees transport or remote errors as `Err`: a chunk
//! dispatch always yields an outcome, with failures folded into per-record
//! entries. That keeps the bulk apply best-effort; one bad chunk never
//! aborts the rest of the run.

use super::types::ItemFailure;
use crate::core::action::BulkAction;
use crate::core::record::RecordId;
use crate::core::registry::OperationDescriptor;
use async_trait::async_trait;

/// Outcome of dispatching one chunk
#[derive(Debug, Clone, Default)]
pub struct ChunkOutcome {
    /// Records the remote service accepted
    pub succeeded: Vec<RecordId>,
    /// Records that failed, transport- or remote-reported
    pub failures: Vec<ItemFailure>,
}

impl ChunkOutcome {
    /// Every record in the chunk succeeded
    pub fn all_succeeded(chunk: &[RecordId]) -> Self {
        Self {
            succeeded: chunk.to_vec(),
            failures: Vec::new(),
        }
    }

    /// Every record in the chunk failed with the same message
    pub fn all_failed(chunk: &[RecordId], message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            succeeded: Vec::new(),
            failures: chunk
                .iter()
                .map(|record| ItemFailure::new(record.clone(), message.clone()))
                .collect(),
        }
    }

    /// Whether no record in the chunk succeeded
    pub fn is_total_failure(&self) -> bool {
        self.succeeded.is_empty() && !self.failures.is_empty()
    }
}

/// Dispatches chunks of a bulk action to the remote service
#[async_trait]
pub trait BulkTransport: Send + Sync {
    /// Apply `action` to every record in `chunk` with one remote request
    /// against `descriptor`'s endpoint. Per-item operation kinds receive
    /// chunks of exactly one record.
    async fn dispatch_chunk(
        &self,
        descriptor: &OperationDescriptor,
        action: &BulkAction,
        chunk: &[RecordId],
    ) -> ChunkOutcome;
}
