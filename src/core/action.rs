//! Bulk action parameters
//!
//! A `BulkAction` is the user's parameterized intent; the registry resolves
//! its kind to the wire-level descriptor. Actions are plain data so the
//! transport layer owns every wire concern.

use super::registry::OperationKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Field name → new value map sent as `update_data`
pub type FieldChanges = serde_json::Map<String, serde_json::Value>;

/// A parameterized bulk action over the current selection
#[derive(Debug, Clone)]
pub enum BulkAction {
    /// Set the given fields on every selected record
    UpdateFields(FieldChanges),
    /// Set the given price fields on every selected record
    UpdatePrices(FieldChanges),
    /// Adjust stock one record at a time
    AdjustStock(StockAdjustment),
    /// Activate or deactivate every selected record
    SetActive(bool),
    /// Export the selection as a file download
    Export(ExportRequest),
}

impl BulkAction {
    /// The operation kind this action resolves through
    pub fn kind(&self) -> OperationKind {
        match self {
            BulkAction::UpdateFields(_) => OperationKind::FieldUpdate,
            BulkAction::UpdatePrices(_) => OperationKind::PriceUpdate,
            BulkAction::AdjustStock(_) => OperationKind::StockAdjust,
            BulkAction::SetActive(true) => OperationKind::Activate,
            BulkAction::SetActive(false) => OperationKind::Deactivate,
            BulkAction::Export(_) => OperationKind::Export,
        }
    }
}

/// How a stock adjustment quantity is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentMode {
    /// Replace the current stock level
    Set,
    /// Increase by the quantity
    Add,
    /// Decrease by the quantity
    Subtract,
}

/// Parameters for one per-record stock adjustment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAdjustment {
    /// Adjustment mode
    pub mode: AdjustmentMode,
    /// Quantity the mode applies
    pub quantity: u32,
    /// Storage location, when the adjustment is location-scoped
    pub location_id: Option<i64>,
    /// Audit reason recorded with the stock movement
    pub reason: String,
    /// Free-form notes
    pub notes: Option<String>,
}

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

/// Parameters for an export download
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// File format requested from the server
    pub format: ExportFormat,
    /// Where the downloaded file is written
    pub destination: PathBuf,
}
