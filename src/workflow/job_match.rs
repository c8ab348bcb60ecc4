//! Job-match workflow: store a pasted job description and re-score keywords

use crate::error::{Result, ResumeAnalyzerError};
use crate::store::{AnalysisStore, JobMatchOutcome};
use log::info;

#[derive(Clone)]
pub struct JobMatchWorkflow {
    store: AnalysisStore,
}

impl JobMatchWorkflow {
    pub fn new(store: AnalysisStore) -> Self {
        Self { store }
    }

    /// Blank descriptions cannot be matched.
    pub fn check_description(job_description: &str) -> Result<()> {
        if job_description.trim().is_empty() {
            return Err(ResumeAnalyzerError::InvalidInput(
                "job description is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Record the description and match it against the current analysis.
    /// Blank input is rejected and leaves the store untouched.
    pub async fn submit(&self, job_description: &str) -> Result<JobMatchOutcome> {
        Self::check_description(job_description)?;

        info!("Matching against job description ({} characters)", job_description.len());
        self.store.set_job_description(job_description);
        self.store.update_analysis_with_job_match(job_description).await
    }

    pub fn clear(&self) {
        self.store.set_job_description("");
    }
}
