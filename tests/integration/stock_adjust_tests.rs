//! Per-record stock adjustment flow

use crate::common::{assertions::assert_job_accounting, client_for, int_ids};
use bulkhub_rs::{
    AdjustmentMode, BatchSubmitter, BulkAction, CancelHandle, NoDelayPacer, NullReporter,
    RecordId, StockAdjustment,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

fn adjust_action() -> BulkAction {
    BulkAction::AdjustStock(StockAdjustment {
        mode: AdjustmentMode::Subtract,
        quantity: 2,
        location_id: None,
        reason: "damaged goods".to_string(),
        notes: Some("quarterly write-off".to_string()),
    })
}

/// Rejects one specific record id, succeeds for the rest
struct RejectRecordResponder {
    reject_id: i64,
}

impl Respond for RejectRecordResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: serde_json::Value = request.body_json().unwrap();
        if body["record_id"] == json!(self.reject_id) {
            ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "error": "Adjustment would result in negative stock"
            }))
        } else {
            ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "previous_stock": 10,
                "new_stock": 8
            }))
        }
    }
}

#[tokio::test]
async fn one_request_per_record_with_one_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/inventory/api/stock/adjust/"))
        .respond_with(RejectRecordResponder { reject_id: 3 })
        .expect(5)
        .mount(&server)
        .await;

    let submitter =
        BatchSubmitter::new(client_for(&server)).with_pacer(Arc::new(NoDelayPacer));
    let job = submitter
        .run(int_ids(1..=5), adjust_action(), &NullReporter, &CancelHandle::new())
        .await
        .unwrap();

    assert_eq!(job.completed, 5);
    assert_eq!(job.succeeded, 4);
    assert_eq!(job.failed(), 1);
    assert_eq!(job.failures[0].record, RecordId::Int(3));
    assert!(job.failures[0].message.contains("negative stock"));
    assert_job_accounting(&job);
}

#[tokio::test]
async fn adjustment_request_carries_the_audit_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/inventory/api/stock/adjust/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    let submitter =
        BatchSubmitter::new(client_for(&server)).with_pacer(Arc::new(NoDelayPacer));
    submitter
        .run(int_ids(7..=7), adjust_action(), &NullReporter, &CancelHandle::new())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = requests[0].body_json().unwrap();
    assert_eq!(body["record_id"], 7);
    assert_eq!(body["adjustment_type"], "subtract");
    assert_eq!(body["quantity"], 2);
    assert_eq!(body["reason"], "damaged goods");
    assert_eq!(body["notes"], "quarterly write-off");
    assert!(body.get("location_id").is_none());
}

#[tokio::test]
async fn network_failure_on_one_record_does_not_stop_the_rest() {
    // No mock mounted for the adjust path: every request 404s and each
    // record is recorded as a chunk-scoped failure.
    let server = MockServer::start().await;
    let submitter =
        BatchSubmitter::new(client_for(&server)).with_pacer(Arc::new(NoDelayPacer));
    let job = submitter
        .run(int_ids(1..=3), adjust_action(), &NullReporter, &CancelHandle::new())
        .await
        .unwrap();

    assert_eq!(job.completed, 3);
    assert_eq!(job.succeeded, 0);
    assert_eq!(job.failed(), 3);
    assert_job_accounting(&job);
}
