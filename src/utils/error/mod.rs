//! Error types for the bulk-operations engine

mod error;

pub use error::{BulkError, Result};
