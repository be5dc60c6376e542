//! Core bulk-operations engine
//!
//! Plain-data job/selection state, the operation registry, the sequential
//! batch submitter and the progress projection. Everything here is
//! transport-agnostic; the `api` module supplies the HTTP transport.

pub mod action;
pub mod batch;
pub mod progress;
pub mod record;
pub mod registry;
pub mod selection;

pub use action::{AdjustmentMode, BulkAction, ExportFormat, ExportRequest, FieldChanges, StockAdjustment};
pub use batch::{
    BatchSubmitter, BulkJob, BulkTransport, CancelHandle, ChunkOutcome, FixedDelayPacer,
    ItemFailure, JobStatus, NoDelayPacer, Pacer,
};
pub use progress::{LogReporter, NullReporter, ProgressReporter, ProgressUpdate, ProgressView};
pub use record::RecordId;
pub use registry::{DispatchMode, OperationDescriptor, OperationKind, OperationRegistry};
pub use selection::{HeaderState, SelectionTracker, SelectionView};
