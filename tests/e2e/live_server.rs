//! Live-deployment smoke test

use crate::skip_without_env;
use bulkhub_rs::{
    BatchSubmitter, BulkAction, CancelHandle, Config, FieldChanges, LogReporter, RecordId,
};
use std::sync::Arc;

#[tokio::test]
#[ignore]
async fn live_field_update_round_trip() {
    skip_without_env!("BULKHUB_BASE_URL");

    let config = Config::from_env().expect("config from environment");
    let client = Arc::new(
        bulkhub_rs::AdminApiClient::new(&config.api).expect("client from live config"),
    );
    let submitter = BatchSubmitter::new(client);

    let mut changes = FieldChanges::new();
    changes.insert("notes".to_string(), serde_json::json!("bulkhub e2e probe"));

    let job = submitter
        .run(
            vec![RecordId::Int(1)],
            BulkAction::UpdateFields(changes),
            &LogReporter::new(),
            &CancelHandle::new(),
        )
        .await
        .expect("live run");

    assert_eq!(job.completed, 1);
}
