//! Test fixtures and factories

use bulkhub_rs::{AdminApiClient, ApiConfig, BulkAction, FieldChanges, RecordId};
use std::sync::Arc;
use wiremock::MockServer;

/// Anti-forgery token every fixture client sends
pub const CSRF_TOKEN: &str = "test-csrf-token";

/// Integer record ids over an inclusive range
pub fn int_ids(range: std::ops::RangeInclusive<i64>) -> Vec<RecordId> {
    range.map(RecordId::Int).collect()
}

/// A field-update action setting one category field
pub fn update_action() -> BulkAction {
    let mut changes = FieldChanges::new();
    changes.insert("category".to_string(), serde_json::json!("tools"));
    BulkAction::UpdateFields(changes)
}

/// A client pointed at the mock server
pub fn client_for(server: &MockServer) -> Arc<AdminApiClient> {
    let config = ApiConfig {
        base_url: server.uri(),
        csrf_token: Some(CSRF_TOKEN.to_string()),
        timeout_secs: 5,
    };
    Arc::new(AdminApiClient::new(&config).expect("client from mock server config"))
}
