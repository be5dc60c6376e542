//! Export download flow

use crate::common::{client_for, int_ids};
use bulkhub_rs::{
    BatchSubmitter, BulkAction, CancelHandle, ExportFormat, ExportRequest, JobStatus,
    NullReporter,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CSV_BODY: &str = "sku,name,stock\nSKU-1,Hammer,10\nSKU-2,Wrench,4\n";

#[tokio::test]
async fn export_posts_the_whole_selection_and_writes_the_download() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/inventory/products/export/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(CSV_BODY.as_bytes().to_vec(), "text/csv"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("products.csv");

    let submitter = BatchSubmitter::new(client_for(&server));
    let job = submitter
        .run(
            int_ids(1..=25),
            BulkAction::Export(ExportRequest {
                format: ExportFormat::Csv,
                destination: destination.clone(),
            }),
            &NullReporter,
            &CancelHandle::new(),
        )
        .await
        .unwrap();

    // One form POST covers the whole selection.
    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(job.succeeded, 25);
    assert_eq!(std::fs::read_to_string(&destination).unwrap(), CSV_BODY);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let form = String::from_utf8(requests[0].body.clone()).unwrap();
    assert_eq!(form.matches("record_ids=").count(), 25);
    assert!(form.contains("format=csv"));
}

#[tokio::test]
async fn failed_export_marks_every_record_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/inventory/products/export/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let submitter = BatchSubmitter::new(client_for(&server));
    let job = submitter
        .run(
            int_ids(1..=4),
            BulkAction::Export(ExportRequest {
                format: ExportFormat::Xlsx,
                destination: dir.path().join("products.xlsx"),
            }),
            &NullReporter,
            &CancelHandle::new(),
        )
        .await
        .unwrap();

    assert_eq!(job.succeeded, 0);
    assert_eq!(job.failed(), 4);
    assert_eq!(job.status, JobStatus::Completed);
}
