//! # bulkhub-rs
//!
//! Async bulk-operations engine for inventory admin APIs: selection
//! tracking, chunked submission with progress reporting, and
//! partial-failure accounting.
//!
//! The engine drives one bulk operation at a time over a selection of
//! record identifiers. Chunks are submitted strictly sequentially, a
//! failed chunk never aborts the rest of the run, and cancellation is
//! honored at chunk boundaries only: a dispatched request always
//! completes.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bulkhub_rs::{
//!     AdminApiClient, BatchSubmitter, BulkAction, CancelHandle, Config, FieldChanges,
//!     LogReporter, RecordId,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/bulkhub.yaml").await?;
//!     let client = Arc::new(AdminApiClient::new(&config.api)?);
//!     let submitter = BatchSubmitter::new(client);
//!
//!     let mut changes = FieldChanges::new();
//!     changes.insert("category".to_string(), serde_json::json!("tools"));
//!
//!     let job = submitter
//!         .run(
//!             (1..=25).map(RecordId::Int).collect(),
//!             BulkAction::UpdateFields(changes),
//!             &LogReporter::new(),
//!             &CancelHandle::new(),
//!         )
//!         .await?;
//!
//!     println!("{}", job.summary());
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod api;
pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use api::AdminApiClient;
pub use config::{ApiConfig, BatchSettings, Config};
pub use core::{
    AdjustmentMode, BatchSubmitter, BulkAction, BulkJob, BulkTransport, CancelHandle,
    ChunkOutcome, ExportFormat, ExportRequest, FieldChanges, FixedDelayPacer, HeaderState,
    ItemFailure, JobStatus, LogReporter, NoDelayPacer, NullReporter, OperationDescriptor,
    OperationKind, OperationRegistry, Pacer, ProgressReporter, ProgressUpdate, ProgressView,
    RecordId, SelectionTracker, SelectionView, StockAdjustment,
};
pub use utils::error::{BulkError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
