//! Custom assertions

use bulkhub_rs::{BulkJob, JobStatus};

/// Assert the job's accounting invariants hold
pub fn assert_job_accounting(job: &BulkJob) {
    assert!(
        job.completed <= job.total,
        "completed {} exceeds total {}",
        job.completed,
        job.total
    );
    assert_eq!(
        job.completed,
        job.succeeded + job.failures.len(),
        "completed must equal succeeded + failures"
    );
    if job.status == JobStatus::Completed {
        assert_eq!(job.completed, job.total, "completed job must cover the selection");
    }
}
