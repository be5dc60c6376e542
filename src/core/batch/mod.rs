//! Batch submission engine
//!
//! Chunked, strictly sequential dispatch of one bulk operation with
//! cooperative cancellation and partial-failure accounting.

mod pacer;
mod submitter;
mod transport;
mod types;


pub use pacer::{FixedDelayPacer, NoDelayPacer, Pacer};
pub use submitter::BatchSubmitter;
pub use transport::{BulkTransport, ChunkOutcome};
pub use types::{ActiveJobGuard, BulkJob, CancelHandle, ItemFailure, JobPermit, JobStatus};
