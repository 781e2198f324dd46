//! The paced import loop.
//!
//! Requests are submitted one at a time through a [`CourseSink`], with a
//! configurable delay between submissions so the receiving side is never
//! flooded. A failed submission never aborts the batch: it is logged,
//! counted, and the loop moves on. The caller gets a summary that
//! distinguishes full, partial, and total failure.

use std::time::Duration;

use async_trait::async_trait;

use optisched_core::reconcile::{CreateCourseRequest, UpdateCourseRequest};

use crate::batch::BatchError;
use crate::error::ExchangeResult;

/// Default delay between submissions.
pub const DEFAULT_PACING: Duration = Duration::from_millis(100);

/// The submission collaborator: wherever accepted courses go.
#[async_trait]
pub trait CourseSink: Send {
    async fn create_course(&mut self, request: &CreateCourseRequest) -> ExchangeResult<()>;

    async fn update_course(&mut self, request: &UpdateCourseRequest) -> ExchangeResult<()>;

    async fn delete_section(&mut self, section_id: i64) -> ExchangeResult<()>;
}

/// Running counters, observable while the import is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportProgress {
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
}

/// How the batch as a whole went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    AllSucceeded,
    PartiallySucceeded,
    NoneSucceeded,
}

/// Final result of an import run.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSummary {
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
    pub errors: Vec<BatchError>,
}

impl ImportSummary {
    #[must_use]
    pub fn outcome(&self) -> ImportOutcome {
        if self.completed == 0 {
            ImportOutcome::NoneSucceeded
        } else if self.failed == 0 {
            ImportOutcome::AllSucceeded
        } else {
            ImportOutcome::PartiallySucceeded
        }
    }
}

/// Submits course requests through a sink, one at a time, with pacing.
#[derive(Debug)]
pub struct ImportRunner<S: CourseSink> {
    sink: S,
    pacing: Duration,
}

impl<S: CourseSink> ImportRunner<S> {
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            pacing: DEFAULT_PACING,
        }
    }

    #[must_use]
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Run the batch without progress observation.
    pub async fn run(&mut self, requests: &[CreateCourseRequest]) -> ImportSummary {
        self.run_with_progress(requests, |_| {}).await
    }

    /// Run the batch, invoking `observe` after every submission.
    ///
    /// There is no mid-batch cancellation: every request is attempted.
    pub async fn run_with_progress(
        &mut self,
        requests: &[CreateCourseRequest],
        mut observe: impl FnMut(ImportProgress) + Send,
    ) -> ImportSummary {
        let total = requests.len();
        let mut progress = ImportProgress {
            total,
            ..ImportProgress::default()
        };
        let mut errors = Vec::new();

        for (index, request) in requests.iter().enumerate() {
            match self.sink.create_course(request).await {
                Ok(()) => {
                    progress.completed += 1;
                    log::info!("imported course {}", request.code);
                }
                Err(err) => {
                    progress.failed += 1;
                    log::warn!("import failed for {}: {}", request.code, err);
                    errors.push(BatchError {
                        code: request.code.clone(),
                        message: err.to_string(),
                    });
                }
            }
            observe(progress);

            if index + 1 < total {
                tokio::time::sleep(self.pacing).await;
            }
        }

        ImportSummary {
            total,
            completed: progress.completed,
            failed: progress.failed,
            errors,
        }
    }

    /// Hand the sink back, e.g. to flush or inspect it.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExchangeError;

    /// Records successful requests; fails any course code it was told to.
    #[derive(Debug, Default)]
    struct RecordingSink {
        created: Vec<String>,
        fail_codes: Vec<String>,
    }

    #[async_trait]
    impl CourseSink for RecordingSink {
        async fn create_course(&mut self, request: &CreateCourseRequest) -> ExchangeResult<()> {
            if self.fail_codes.contains(&request.code) {
                return Err(ExchangeError::Submission {
                    code: request.code.clone(),
                    message: "rejected".to_string(),
                });
            }
            self.created.push(request.code.clone());
            Ok(())
        }

        async fn update_course(&mut self, _request: &UpdateCourseRequest) -> ExchangeResult<()> {
            Ok(())
        }

        async fn delete_section(&mut self, _section_id: i64) -> ExchangeResult<()> {
            Ok(())
        }
    }

    fn request(code: &str) -> CreateCourseRequest {
        CreateCourseRequest {
            code: code.to_string(),
            title: "Course".to_string(),
            majors_list: vec!["Computer Science".to_string()],
            color: "blue".to_string(),
            duration: 2.0,
            capacity: 30,
            sections_list: vec![],
        }
    }

    #[tokio::test]
    async fn test_all_succeed() {
        let mut runner = ImportRunner::new(RecordingSink::default())
            .with_pacing(Duration::from_millis(1));
        let summary = runner.run(&[request("CS101"), request("MA201")]).await;

        assert_eq!(summary.completed, 2);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.outcome(), ImportOutcome::AllSucceeded);
        assert_eq!(runner.into_sink().created, vec!["CS101", "MA201"]);
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_going() {
        let sink = RecordingSink {
            fail_codes: vec!["MA201".to_string()],
            ..RecordingSink::default()
        };
        let mut runner = ImportRunner::new(sink).with_pacing(Duration::from_millis(1));
        let summary = runner
            .run(&[request("CS101"), request("MA201"), request("PH301")])
            .await;

        assert_eq!(summary.completed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.outcome(), ImportOutcome::PartiallySucceeded);
        assert_eq!(summary.errors.len(), 1);
        assert_eq!(summary.errors[0].code, "MA201");

        // The failure did not stop the later request.
        assert_eq!(runner.into_sink().created, vec!["CS101", "PH301"]);
    }

    #[tokio::test]
    async fn test_none_succeed() {
        let sink = RecordingSink {
            fail_codes: vec!["CS101".to_string()],
            ..RecordingSink::default()
        };
        let mut runner = ImportRunner::new(sink).with_pacing(Duration::from_millis(1));
        let summary = runner.run(&[request("CS101")]).await;

        assert_eq!(summary.outcome(), ImportOutcome::NoneSucceeded);
        assert_eq!(summary.failed, 1);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let mut runner = ImportRunner::new(RecordingSink::default());
        let summary = runner.run(&[]).await;
        assert_eq!(summary.total, 0);
        assert_eq!(summary.outcome(), ImportOutcome::NoneSucceeded);
    }

    #[tokio::test]
    async fn test_progress_observed_per_request() {
        let mut runner = ImportRunner::new(RecordingSink::default())
            .with_pacing(Duration::from_millis(1));
        let mut seen = Vec::new();
        runner
            .run_with_progress(&[request("CS101"), request("MA201")], |p| seen.push(p))
            .await;

        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].completed, 1);
        assert_eq!(seen[1].completed, 2);
        assert!(seen.iter().all(|p| p.total == 2));
    }
}
