//! Wire types for the admin bulk endpoints

use crate::core::action::AdjustmentMode;
use crate::core::record::RecordId;
use serde::{Deserialize, Serialize};

/// Body for the grouped bulk update endpoints
#[derive(Debug, Serialize)]
pub struct BulkUpdateRequest<'a> {
    pub record_ids: &'a [RecordId],
    pub update_data: &'a serde_json::Map<String, serde_json::Value>,
}

/// Body for the activate/deactivate endpoint
#[derive(Debug, Serialize)]
pub struct SetActiveRequest<'a> {
    pub record_ids: &'a [RecordId],
    pub is_active: bool,
}

/// Body for one per-record stock adjustment
#[derive(Debug, Serialize)]
pub struct StockAdjustRequest<'a> {
    pub record_id: &'a RecordId,
    pub adjustment_type: AdjustmentMode,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<i64>,
    pub reason: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<&'a str>,
}

/// A record-scoped failure reported inside a grouped response
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteItemError {
    pub record_id: RecordId,
    pub error: String,
}

/// Response of the grouped bulk endpoints
#[derive(Debug, Deserialize)]
pub struct BulkUpdateResponse {
    pub success: bool,
    #[serde(default)]
    pub updated_count: u64,
    /// Operation-scoped failure message when `success` is false
    #[serde(default)]
    pub error: Option<String>,
    /// Record-scoped failures; the rest of the chunk still applied
    #[serde(default)]
    pub errors: Vec<RemoteItemError>,
}

/// Response of the stock adjustment endpoint
#[derive(Debug, Deserialize)]
pub struct StockAdjustResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub previous_stock: Option<i64>,
    #[serde(default)]
    pub new_stock: Option<i64>,
}
