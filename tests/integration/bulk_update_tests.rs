//! Grouped bulk update and activate/deactivate flows

use crate::common::{assertions::assert_job_accounting, client_for, int_ids, update_action, CSRF_TOKEN};
use bulkhub_rs::{BatchSubmitter, BulkAction, CancelHandle, JobStatus, NullReporter};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Fails the Nth request (1-based) with a 500, succeeds otherwise
struct FailNthResponder {
    fail_on: usize,
    calls: AtomicUsize,
}

impl FailNthResponder {
    fn new(fail_on: usize) -> Self {
        Self {
            fail_on,
            calls: AtomicUsize::new(0),
        }
    }
}

impl Respond for FailNthResponder {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_on {
            ResponseTemplate::new(500)
        } else {
            ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "updated_count": 10
            }))
        }
    }
}

#[tokio::test]
async fn field_update_chunks_and_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/inventory/products/bulk-update/"))
        .and(header("X-CSRFToken", CSRF_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "updated_count": 10
        })))
        .expect(3)
        .mount(&server)
        .await;

    let submitter = BatchSubmitter::new(client_for(&server));
    let job = submitter
        .run(int_ids(1..=25), update_action(), &NullReporter, &CancelHandle::new())
        .await
        .unwrap();

    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(job.succeeded, 25);
    assert!(job.failures.is_empty());
    assert_job_accounting(&job);

    // 25 ids in chunks of 10 -> request bodies of 10, 10 and 5 ids.
    let requests = server.received_requests().await.unwrap();
    let sizes: Vec<usize> = requests
        .iter()
        .map(|r| {
            let body: serde_json::Value = r.body_json().unwrap();
            body["record_ids"].as_array().unwrap().len()
        })
        .collect();
    assert_eq!(sizes, vec![10, 10, 5]);
    let body: serde_json::Value = requests[0].body_json().unwrap();
    assert_eq!(body["update_data"]["category"], "tools");
}

#[tokio::test]
async fn failed_middle_chunk_is_recorded_and_run_continues() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/inventory/products/bulk-update/"))
        .respond_with(FailNthResponder::new(2))
        .expect(3)
        .mount(&server)
        .await;

    let submitter = BatchSubmitter::new(client_for(&server));
    let job = submitter
        .run(int_ids(1..=25), update_action(), &NullReporter, &CancelHandle::new())
        .await
        .unwrap();

    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(job.completed, 25);
    assert_eq!(job.succeeded, 15);
    assert_eq!(job.failed(), 10);
    assert_job_accounting(&job);
}

#[tokio::test]
async fn record_scoped_errors_in_a_grouped_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/inventory/products/bulk-update/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "updated_count": 4,
            "errors": [{"record_id": 2, "error": "record not found"}]
        })))
        .mount(&server)
        .await;

    let submitter = BatchSubmitter::new(client_for(&server));
    let job = submitter
        .run(int_ids(1..=5), update_action(), &NullReporter, &CancelHandle::new())
        .await
        .unwrap();

    assert_eq!(job.succeeded, 4);
    assert_eq!(job.failed(), 1);
    assert_eq!(job.failures[0].message, "record not found");
    assert_job_accounting(&job);
}

#[tokio::test]
async fn deactivate_uses_the_set_active_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/inventory/products/bulk-set-active/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "updated_count": 20
        })))
        .expect(2)
        .mount(&server)
        .await;

    let submitter = BatchSubmitter::new(client_for(&server));
    let job = submitter
        .run(
            int_ids(1..=25),
            BulkAction::SetActive(false),
            &NullReporter,
            &CancelHandle::new(),
        )
        .await
        .unwrap();

    // Activate/deactivate batches 20 at a time.
    assert_eq!(job.succeeded, 25);
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    let body: serde_json::Value = requests[0].body_json().unwrap();
    assert_eq!(body["is_active"], false);
    assert_eq!(body["record_ids"].as_array().unwrap().len(), 20);
}

#[tokio::test]
async fn missing_csrf_token_still_sends_no_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/inventory/products/bulk-update/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "updated_count": 1
        })))
        .mount(&server)
        .await;

    let config = bulkhub_rs::ApiConfig {
        base_url: server.uri(),
        csrf_token: None,
        timeout_secs: 5,
    };
    let client = std::sync::Arc::new(bulkhub_rs::AdminApiClient::new(&config).unwrap());
    let submitter = BatchSubmitter::new(client);
    submitter
        .run(int_ids(1..=1), update_action(), &NullReporter, &CancelHandle::new())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("X-CSRFToken").is_none());
}
