//! Upload workflow: `Idle -> Uploading -> Success | Error`, with `reset`
//! returning to `Idle` from anywhere. Only an idle workflow accepts a file.

use crate::analysis::{AnalysisRecord, ResumeFile};
use crate::error::{Result, ResumeAnalyzerError};
use crate::input::validate;
use crate::store::AnalysisStore;
use log::{error, info, warn};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shown when the engine fails, whatever the underlying cause.
pub const PROCESSING_FAILED_MESSAGE: &str = "Failed to process the file. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UploadStatus {
    Idle,
    Uploading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadState {
    pub status: UploadStatus,
    pub file: Option<ResumeFile>,
    pub error_message: Option<String>,
}

impl Default for UploadState {
    fn default() -> Self {
        Self {
            status: UploadStatus::Idle,
            file: None,
            error_message: None,
        }
    }
}

/// What became of an upload whose validation passed.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Completed(AnalysisRecord),
    /// The workflow was reset while the engine was running; the result was
    /// ignored.
    Discarded,
}

#[derive(Debug, Default)]
struct WorkflowState {
    upload: UploadState,
    /// Bumped on every submit and reset; late results carry the old value.
    generation: u64,
    history: Vec<UploadStatus>,
}

impl WorkflowState {
    fn transition(&mut self, status: UploadStatus) {
        self.upload.status = status;
        self.history.push(status);
    }
}

#[derive(Clone)]
pub struct UploadWorkflow {
    store: AnalysisStore,
    state: Arc<Mutex<WorkflowState>>,
}

impl UploadWorkflow {
    pub fn new(store: AnalysisStore) -> Self {
        let mut state = WorkflowState::default();
        state.history.push(UploadStatus::Idle);
        Self {
            store,
            state: Arc::new(Mutex::new(state)),
        }
    }

    fn state(&self) -> MutexGuard<'_, WorkflowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validate and analyze a file. Validation and engine failures move the
    /// workflow to `Error` and are also returned.
    pub async fn submit(&self, file: ResumeFile) -> Result<UploadOutcome> {
        let ticket = {
            let mut state = self.state();
            match state.upload.status {
                UploadStatus::Idle => {}
                UploadStatus::Uploading => {
                    return Err(ResumeAnalyzerError::Busy(
                        "a resume is already being analyzed".to_string(),
                    ));
                }
                UploadStatus::Success | UploadStatus::Error => {
                    return Err(ResumeAnalyzerError::InvalidInput(
                        "reset the upload before submitting another file".to_string(),
                    ));
                }
            }

            if let Err(e) = validate(&file) {
                warn!("Rejected upload {}: {}", file.name, e);
                state.upload.file = None;
                state.upload.error_message = Some(e.to_string());
                state.transition(UploadStatus::Error);
                return Err(e);
            }

            info!("Uploading {} ({} bytes)", file.name, file.size_bytes);
            state.generation += 1;
            state.upload.file = Some(file.clone());
            state.upload.error_message = None;
            state.transition(UploadStatus::Uploading);
            state.generation
        };

        self.store.set_is_analyzing(true);
        let result = self.store.engine().analyze(&file).await;

        let mut state = self.state();
        if state.generation != ticket {
            info!("Ignoring analysis result for {} after reset", file.name);
            return Ok(UploadOutcome::Discarded);
        }

        match result {
            Ok(record) => {
                self.store.set_analysis_data(record.clone());
                self.store.set_is_analyzing(false);
                state.transition(UploadStatus::Success);
                info!("Analysis of {} complete: {}/100", file.name, record.overall_score);
                Ok(UploadOutcome::Completed(record))
            }
            Err(e) => {
                error!("Error processing file {}: {}", file.name, e);
                self.store.set_is_analyzing(false);
                state.upload.error_message = Some(PROCESSING_FAILED_MESSAGE.to_string());
                state.transition(UploadStatus::Error);
                Err(match e {
                    ResumeAnalyzerError::ProcessingFailed(_) => e,
                    other => ResumeAnalyzerError::ProcessingFailed(other.to_string()),
                })
            }
        }
    }

    /// Back to `Idle`. The store keeps its analysis.
    pub fn reset(&self) {
        let mut state = self.state();
        if state.upload.status == UploadStatus::Uploading {
            self.store.set_is_analyzing(false);
        }
        state.generation += 1;
        state.upload.file = None;
        state.upload.error_message = None;
        state.transition(UploadStatus::Idle);
    }

    pub fn status(&self) -> UploadStatus {
        self.state().upload.status
    }

    pub fn upload_state(&self) -> UploadState {
        self.state().upload.clone()
    }

    /// Every status the workflow has been in, oldest first.
    pub fn history(&self) -> Vec<UploadStatus> {
        self.state().history.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisEngine, KeywordMatch, MockAnalysisEngine};
    use crate::config::AnalysisConfig;
    use crate::output::AnalysisView;
    use crate::store::JobMatchOutcome;
    use crate::workflow::JobMatchWorkflow;
    use async_trait::async_trait;
    use std::time::Duration;

    const MB: u64 = 1024 * 1024;

    struct FailingEngine;

    #[async_trait]
    impl AnalysisEngine for FailingEngine {
        async fn analyze(&self, _file: &ResumeFile) -> Result<AnalysisRecord> {
            Err(ResumeAnalyzerError::ProcessingFailed("backend unavailable".to_string()))
        }

        async fn match_keywords(&self, _job_description: &str) -> Result<KeywordMatch> {
            Err(ResumeAnalyzerError::ProcessingFailed("backend unavailable".to_string()))
        }
    }

    fn workflow_with(engine: Arc<dyn AnalysisEngine>) -> (AnalysisStore, UploadWorkflow) {
        let store = AnalysisStore::new(engine);
        let workflow = UploadWorkflow::new(store.clone());
        (store, workflow)
    }

    fn pdf(size: u64) -> ResumeFile {
        ResumeFile::new("resume.pdf", size, "application/pdf")
    }

    #[tokio::test]
    async fn test_successful_upload() {
        let (store, workflow) = workflow_with(Arc::new(MockAnalysisEngine::instant().unwrap()));

        let outcome = workflow.submit(pdf(2 * MB)).await.unwrap();
        assert!(matches!(outcome, UploadOutcome::Completed(_)));
        assert_eq!(
            workflow.history(),
            vec![UploadStatus::Idle, UploadStatus::Uploading, UploadStatus::Success]
        );
        assert!(store.analysis_data().is_some());
        assert!(!store.is_analyzing());
        assert_eq!(workflow.upload_state().file, Some(pdf(2 * MB)));
    }

    #[tokio::test]
    async fn test_validation_failure_skips_uploading() {
        let (store, workflow) = workflow_with(Arc::new(MockAnalysisEngine::instant().unwrap()));

        let err = workflow.submit(pdf(6 * MB)).await.unwrap_err();
        assert!(matches!(err, ResumeAnalyzerError::TooLarge(_)));
        assert_eq!(workflow.history(), vec![UploadStatus::Idle, UploadStatus::Error]);
        assert!(workflow
            .upload_state()
            .error_message
            .unwrap()
            .contains("5MB"));
        assert!(store.analysis_data().is_none());
        assert!(!store.is_analyzing());
    }

    #[tokio::test]
    async fn test_engine_failure_sets_generic_message() {
        let (store, workflow) = workflow_with(Arc::new(FailingEngine));

        let err = workflow.submit(pdf(MB)).await.unwrap_err();
        assert!(matches!(err, ResumeAnalyzerError::ProcessingFailed(_)));
        assert_eq!(err.to_string(), "Processing failed: backend unavailable");

        let state = workflow.upload_state();
        assert_eq!(state.status, UploadStatus::Error);
        assert_eq!(state.error_message.as_deref(), Some(PROCESSING_FAILED_MESSAGE));
        assert!(!store.is_analyzing());
    }

    #[tokio::test]
    async fn test_reset_keeps_store_record() {
        let (store, workflow) = workflow_with(Arc::new(MockAnalysisEngine::instant().unwrap()));
        workflow.submit(pdf(MB)).await.unwrap();

        workflow.reset();
        let state = workflow.upload_state();
        assert_eq!(state, UploadState::default());
        assert!(store.analysis_data().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_during_upload_discards_late_result() {
        let engine = MockAnalysisEngine::new(&AnalysisConfig {
            resume_delay_ms: 1500,
            keyword_delay_ms: 1500,
        })
        .unwrap();
        let (store, workflow) = workflow_with(Arc::new(engine));

        let pending = {
            let workflow = workflow.clone();
            tokio::spawn(async move { workflow.submit(pdf(MB)).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(workflow.status(), UploadStatus::Uploading);

        let busy = workflow.submit(pdf(MB)).await;
        assert!(matches!(busy, Err(ResumeAnalyzerError::Busy(_))));

        workflow.reset();
        assert!(!store.is_analyzing());

        let outcome = pending.await.unwrap().unwrap();
        assert_eq!(outcome, UploadOutcome::Discarded);
        assert_eq!(workflow.status(), UploadStatus::Idle);
        assert!(store.analysis_data().is_none());
    }

    #[tokio::test]
    async fn test_submit_requires_reset_after_finish() {
        let (store, workflow) = workflow_with(Arc::new(MockAnalysisEngine::instant().unwrap()));
        workflow.submit(pdf(MB)).await.unwrap();

        let png = ResumeFile::new("headshot.png", MB, "image/png");
        let err = workflow.submit(png).await.unwrap_err();
        assert!(matches!(err, ResumeAnalyzerError::InvalidInput(_)));
        assert_eq!(workflow.status(), UploadStatus::Success);
        assert_eq!(workflow.upload_state().file, Some(pdf(MB)));

        workflow.reset();
        let png = ResumeFile::new("headshot.png", MB, "image/png");
        assert!(workflow.submit(png).await.is_err());
        let state = workflow.upload_state();
        assert_eq!(state.status, UploadStatus::Error);
        assert_eq!(state.file, None);

        let retry = workflow.submit(pdf(MB)).await;
        assert!(matches!(retry, Err(ResumeAnalyzerError::InvalidInput(_))));

        workflow.reset();
        workflow.submit(pdf(MB)).await.unwrap();
        assert_eq!(
            workflow.history(),
            vec![
                UploadStatus::Idle,
                UploadStatus::Uploading,
                UploadStatus::Success,
                UploadStatus::Idle,
                UploadStatus::Error,
                UploadStatus::Idle,
                UploadStatus::Uploading,
                UploadStatus::Success,
            ]
        );
        assert!(store.analysis_data().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_job_match_during_upload_keeps_loading() {
        let engine = MockAnalysisEngine::new(&AnalysisConfig {
            resume_delay_ms: 3000,
            keyword_delay_ms: 1500,
        })
        .unwrap();
        let (store, workflow) = workflow_with(Arc::new(engine));
        store.set_analysis_data(
            MockAnalysisEngine::instant().unwrap().analyze(&pdf(MB)).await.unwrap(),
        );
        let job_match = JobMatchWorkflow::new(store.clone());

        let pending = {
            let workflow = workflow.clone();
            tokio::spawn(async move { workflow.submit(pdf(MB)).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;

        let result = job_match.submit("Python").await;
        assert!(matches!(result, Err(ResumeAnalyzerError::Busy(_))));
        assert_eq!(workflow.status(), UploadStatus::Uploading);
        assert!(store.is_analyzing());
        assert_eq!(AnalysisView::from_snapshot(&store.snapshot()), AnalysisView::Loading);

        let outcome = pending.await.unwrap().unwrap();
        assert!(matches!(outcome, UploadOutcome::Completed(_)));
        assert!(!store.is_analyzing());

        let outcome = job_match.submit("Python").await.unwrap();
        assert!(matches!(outcome, JobMatchOutcome::Applied(_)));
    }
}
