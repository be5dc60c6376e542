//! HTTP transport against the admin bulk endpoints

mod client;
mod types;

pub use client::AdminApiClient;
pub use types::{
    BulkUpdateRequest, BulkUpdateResponse, RemoteItemError, SetActiveRequest, StockAdjustRequest,
    StockAdjustResponse,
};
