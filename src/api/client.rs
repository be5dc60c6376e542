//! HTTP client for the admin bulk endpoints
//!
//! Wraps `reqwest` with the base URL, timeout and anti-forgery header the
//! hosting deployment supplies. As the submitter's transport it never
//! returns `Err` from a chunk dispatch: transport and remote failures are
//! folded into per-record failures so the run keeps going.

use super::types::{
    BulkUpdateRequest, BulkUpdateResponse, SetActiveRequest, StockAdjustRequest,
    StockAdjustResponse,
};
use crate::config::ApiConfig;
use crate::core::action::{BulkAction, ExportRequest, FieldChanges, StockAdjustment};
use crate::core::batch::{BulkTransport, ChunkOutcome, ItemFailure};
use crate::core::record::RecordId;
use crate::core::registry::OperationDescriptor;
use crate::utils::error::{BulkError, Result};
use async_trait::async_trait;
use futures::StreamExt;
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use url::Url;

/// Django's anti-forgery header; the token itself comes from the host.
const CSRF_HEADER: &str = "X-CSRFToken";

/// Client for the admin bulk endpoints
#[derive(Debug, Clone)]
pub struct AdminApiClient {
    http: reqwest::Client,
    base_url: Url,
    csrf_token: Option<String>,
}

impl AdminApiClient {
    /// Build a client from configuration
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| BulkError::config(format!("Invalid base URL '{}': {}", config.base_url, e)))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .cookie_store(true)
            .user_agent(concat!("bulkhub-rs/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            csrf_token: config.csrf_token.clone(),
        })
    }

    /// Override the anti-forgery token after construction
    pub fn with_csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(token.into());
        self
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| BulkError::config(format!("Invalid endpoint path '{}': {}", path, e)))
    }

    fn post(&self, url: Url) -> reqwest::RequestBuilder {
        let mut builder = self.http.post(url);
        if let Some(token) = &self.csrf_token {
            builder = builder.header(CSRF_HEADER, token);
        }
        builder
    }

    /// Grouped field/price update: one request for the whole chunk
    pub async fn bulk_update(
        &self,
        path: &str,
        record_ids: &[RecordId],
        update_data: &FieldChanges,
    ) -> Result<BulkUpdateResponse> {
        let url = self.endpoint(path)?;
        let response = self
            .post(url)
            .json(&BulkUpdateRequest {
                record_ids,
                update_data,
            })
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    /// Grouped activate/deactivate
    pub async fn set_active(
        &self,
        path: &str,
        record_ids: &[RecordId],
        is_active: bool,
    ) -> Result<BulkUpdateResponse> {
        let url = self.endpoint(path)?;
        let response = self
            .post(url)
            .json(&SetActiveRequest {
                record_ids,
                is_active,
            })
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    /// One per-record stock adjustment
    pub async fn stock_adjust(
        &self,
        path: &str,
        record_id: &RecordId,
        adjustment: &StockAdjustment,
    ) -> Result<StockAdjustResponse> {
        let url = self.endpoint(path)?;
        let response = self
            .post(url)
            .json(&StockAdjustRequest {
                record_id,
                adjustment_type: adjustment.mode,
                quantity: adjustment.quantity,
                location_id: adjustment.location_id,
                reason: &adjustment.reason,
                notes: adjustment.notes.as_deref(),
            })
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    /// Export download: form POST with repeated `record_ids` fields,
    /// response body streamed to `destination`. Returns bytes written.
    pub async fn export(
        &self,
        path: &str,
        record_ids: &[RecordId],
        format: &str,
        destination: &Path,
    ) -> Result<u64> {
        let url = self.endpoint(path)?;
        let mut form: Vec<(&str, String)> = record_ids
            .iter()
            .map(|id| ("record_ids", id.to_string()))
            .collect();
        form.push(("format", format.to_string()));

        let response = self
            .post(url)
            .form(&form)
            .send()
            .await?
            .error_for_status()?;

        let mut file = tokio::fs::File::create(destination).await?;
        let mut stream = response.bytes_stream();
        let mut written = 0u64;
        while let Some(chunk) = stream.next().await {
            let bytes = chunk?;
            file.write_all(&bytes).await?;
            written += bytes.len() as u64;
        }
        file.flush().await?;
        debug!("Export wrote {} bytes to {}", written, destination.display());
        Ok(written)
    }

    async fn try_dispatch(
        &self,
        descriptor: &OperationDescriptor,
        action: &BulkAction,
        chunk: &[RecordId],
    ) -> Result<ChunkOutcome> {
        match action {
            BulkAction::UpdateFields(changes) | BulkAction::UpdatePrices(changes) => {
                let response = self.bulk_update(descriptor.endpoint, chunk, changes).await?;
                Ok(grouped_outcome(chunk, response))
            }
            BulkAction::SetActive(active) => {
                let response = self.set_active(descriptor.endpoint, chunk, *active).await?;
                Ok(grouped_outcome(chunk, response))
            }
            BulkAction::AdjustStock(adjustment) => {
                // Chunk size is 1 for this kind; the loop covers custom
                // descriptor tables that group anyway.
                let mut outcome = ChunkOutcome::default();
                for record in chunk {
                    match self.stock_adjust(descriptor.endpoint, record, adjustment).await {
                        Ok(response) if response.success => {
                            outcome.succeeded.push(record.clone())
                        }
                        Ok(response) => outcome.failures.push(ItemFailure::new(
                            record.clone(),
                            response
                                .error
                                .unwrap_or_else(|| "adjustment rejected".to_string()),
                        )),
                        Err(err) => outcome
                            .failures
                            .push(ItemFailure::new(record.clone(), err.to_string())),
                    }
                }
                Ok(outcome)
            }
            BulkAction::Export(ExportRequest {
                format,
                destination,
            }) => {
                self.export(descriptor.endpoint, chunk, format.as_str(), destination)
                    .await?;
                Ok(ChunkOutcome::all_succeeded(chunk))
            }
        }
    }
}

/// Map a grouped response onto the chunk's records
fn grouped_outcome(chunk: &[RecordId], response: BulkUpdateResponse) -> ChunkOutcome {
    if !response.success {
        let message = response
            .error
            .unwrap_or_else(|| "remote service rejected the request".to_string());
        return ChunkOutcome::all_failed(chunk, message);
    }

    let failures: Vec<ItemFailure> = response
        .errors
        .into_iter()
        .map(|e| ItemFailure::new(e.record_id, e.error))
        .collect();
    let failed_ids: HashSet<&RecordId> = failures.iter().map(|f| &f.record).collect();
    let succeeded = chunk
        .iter()
        .filter(|id| !failed_ids.contains(id))
        .cloned()
        .collect();
    ChunkOutcome { succeeded, failures }
}

#[async_trait]
impl BulkTransport for AdminApiClient {
    async fn dispatch_chunk(
        &self,
        descriptor: &OperationDescriptor,
        action: &BulkAction,
        chunk: &[RecordId],
    ) -> ChunkOutcome {
        match self.try_dispatch(descriptor, action, chunk).await {
            Ok(outcome) => outcome,
            // Transport failures are chunk-scoped, never fatal to the run.
            Err(err) => ChunkOutcome::all_failed(chunk, err.to_string()),
        }
    }
}
