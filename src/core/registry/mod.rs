//! Operation registry
//!
//! Maps each bulk operation kind to its remote endpoint, request shape and
//! batching parameters. Descriptors are declared once at startup and never
//! mutated at runtime; `OperationRegistry::builtin()` is the production
//! table, custom tables exist for tests.

use crate::utils::error::{BulkError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Kinds of bulk operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Bulk field update across selected records
    FieldUpdate,
    /// Bulk price update across selected records
    PriceUpdate,
    /// Per-record stock adjustment
    StockAdjust,
    /// Mark selected records active
    Activate,
    /// Mark selected records inactive
    Deactivate,
    /// Export selected records as a file download
    Export,
}

impl OperationKind {
    /// Stable name used in logs, config and the CLI
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::FieldUpdate => "field_update",
            OperationKind::PriceUpdate => "price_update",
            OperationKind::StockAdjust => "stock_adjust",
            OperationKind::Activate => "activate",
            OperationKind::Deactivate => "deactivate",
            OperationKind::Export => "export",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = BulkError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "field_update" => Ok(OperationKind::FieldUpdate),
            "price_update" => Ok(OperationKind::PriceUpdate),
            "stock_adjust" => Ok(OperationKind::StockAdjust),
            "activate" => Ok(OperationKind::Activate),
            "deactivate" => Ok(OperationKind::Deactivate),
            "export" => Ok(OperationKind::Export),
            other => Err(BulkError::unknown_kind(other)),
        }
    }
}

/// How a chunk is sent over the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// One request carrying every record id in the chunk
    Grouped,
    /// One request per record (chunk size is 1)
    PerItem,
}

/// Static description of one bulk operation
#[derive(Debug, Clone)]
pub struct OperationDescriptor {
    /// Operation kind
    pub kind: OperationKind,
    /// Endpoint path, joined onto the configured base URL
    pub endpoint: &'static str,
    /// HTTP method
    pub method: &'static str,
    /// Wire dispatch mode
    pub dispatch: DispatchMode,
    /// Records per request
    pub batch_size: usize,
    /// Fixed pause between consecutive requests, if any
    pub pause_between: Option<Duration>,
}

/// Registry of operation descriptors
pub struct OperationRegistry {
    descriptors: HashMap<OperationKind, OperationDescriptor>,
}

impl OperationRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            descriptors: HashMap::new(),
        }
    }

    /// The production descriptor table
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(OperationDescriptor {
            kind: OperationKind::FieldUpdate,
            endpoint: "/inventory/products/bulk-update/",
            method: "POST",
            dispatch: DispatchMode::Grouped,
            batch_size: 10,
            pause_between: None,
        });
        registry.register(OperationDescriptor {
            kind: OperationKind::PriceUpdate,
            endpoint: "/inventory/products/bulk-price-update/",
            method: "POST",
            dispatch: DispatchMode::Grouped,
            batch_size: 10,
            pause_between: None,
        });
        // Stock adjustments go one record at a time so each carries its own
        // quantity/location, with a pause so the remote service is not
        // hammered by the per-item request train.
        registry.register(OperationDescriptor {
            kind: OperationKind::StockAdjust,
            endpoint: "/inventory/api/stock/adjust/",
            method: "POST",
            dispatch: DispatchMode::PerItem,
            batch_size: 1,
            pause_between: Some(Duration::from_millis(100)),
        });
        registry.register(OperationDescriptor {
            kind: OperationKind::Activate,
            endpoint: "/inventory/products/bulk-set-active/",
            method: "POST",
            dispatch: DispatchMode::Grouped,
            batch_size: 20,
            pause_between: None,
        });
        registry.register(OperationDescriptor {
            kind: OperationKind::Deactivate,
            endpoint: "/inventory/products/bulk-set-active/",
            method: "POST",
            dispatch: DispatchMode::Grouped,
            batch_size: 20,
            pause_between: None,
        });
        // Export is a single form POST for the whole selection.
        registry.register(OperationDescriptor {
            kind: OperationKind::Export,
            endpoint: "/inventory/products/export/",
            method: "POST",
            dispatch: DispatchMode::Grouped,
            batch_size: usize::MAX,
            pause_between: None,
        });
        registry
    }

    /// Register a descriptor
    pub fn register(&mut self, descriptor: OperationDescriptor) {
        debug_assert!(descriptor.batch_size > 0);
        self.descriptors.insert(descriptor.kind, descriptor);
    }

    /// Resolve the descriptor for a kind
    pub fn resolve(&self, kind: OperationKind) -> Result<&OperationDescriptor> {
        self.descriptors
            .get(&kind)
            .ok_or_else(|| BulkError::unknown_kind(kind.as_str()))
    }

    /// Check if a kind is registered
    pub fn contains(&self, kind: OperationKind) -> bool {
        self.descriptors.contains_key(&kind)
    }

    /// List registered kinds
    pub fn list(&self) -> Vec<OperationKind> {
        self.descriptors.keys().copied().collect()
    }

    /// Get descriptor count
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for OperationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationRegistry")
            .field("kinds", &self.list())
            .finish()
    }
}

static SHARED: Lazy<Arc<OperationRegistry>> = Lazy::new(|| Arc::new(OperationRegistry::builtin()));

impl OperationRegistry {
    /// The process-wide production registry, loaded once
    pub fn shared() -> Arc<OperationRegistry> {
        SHARED.clone()
    }
}
