//! Error handling for the bulk-operations engine
//!
//! One error enum covers the whole crate. Chunk-scoped transport and
//! remote failures are folded into the running job's failure list rather
//! than surfaced through this type; `BulkError` is for failures that abort
//! an invocation before (or instead of) creating a job.

use thiserror::Error;

/// Result type alias for the engine
pub type Result<T> = std::result::Result<T, BulkError>;

/// Main error type for the engine
#[derive(Error, Debug)]
pub enum BulkError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unrecognized bulk operation kind
    #[error("Unknown operation kind: {0}")]
    UnknownOperationKind(String),

    /// Bulk action invoked with nothing selected
    #[error("Empty selection: {0}")]
    EmptySelection(String),

    /// A bulk operation is already running
    #[error("Operation already in progress: {0}")]
    OperationInProgress(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Network errors
    #[error("Network error: {0}")]
    Network(String),

    /// Errors reported by the remote service
    #[error("Remote error: {0}")]
    Remote(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Helper functions for creating specific errors
impl BulkError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn unknown_kind<S: Into<String>>(kind: S) -> Self {
        Self::UnknownOperationKind(kind.into())
    }

    pub fn empty_selection<S: Into<String>>(message: S) -> Self {
        Self::EmptySelection(message.into())
    }

    pub fn in_progress<S: Into<String>>(message: S) -> Self {
        Self::OperationInProgress(message.into())
    }

    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    pub fn remote<S: Into<String>>(message: S) -> Self {
        Self::Remote(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Whether this error aborts the invocation before a job exists
    pub fn is_invocation_error(&self) -> bool {
        matches!(
            self,
            BulkError::UnknownOperationKind(_)
                | BulkError::EmptySelection(_)
                | BulkError::OperationInProgress(_)
        )
    }
}
