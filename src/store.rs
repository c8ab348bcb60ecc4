//! Shared analysis store
//!
//! The store is an explicit handle: whoever needs it is given a clone at
//! construction time. Clones share one state. Every mutation takes the lock,
//! changes state and releases it before any await, so each operation is
//! atomic with respect to the others.
//!
//! Async job matches are stamped with the store's generation. The generation
//! moves forward whenever a new record is stored or a new analysis starts,
//! and a match that finishes under a different generation is dropped instead
//! of being merged into a record it was never computed for.
//!
//! The in-flight flag has two owners: a resume analysis (set through
//! `set_is_analyzing`) and the pending job match. The store reports busy
//! while either one holds it, and each owner only ever releases its own part.

use crate::analysis::{AnalysisEngine, AnalysisRecord, KeywordMatch};
use crate::error::{Result, ResumeAnalyzerError};
use log::{debug, info, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct StoreState {
    analysis_data: Option<AnalysisRecord>,
    /// A resume analysis is running.
    analysis_in_flight: bool,
    job_description: String,
    generation: u64,
    /// Generation under which the pending job match was started.
    pending_match: Option<u64>,
}

impl StoreState {
    fn is_analyzing(&self) -> bool {
        self.analysis_in_flight || self.pending_match.is_some()
    }
}

/// Read-only copy of the store for rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreSnapshot {
    pub analysis_data: Option<AnalysisRecord>,
    pub is_analyzing: bool,
    pub job_description: String,
}

/// Result of [`AnalysisStore::update_analysis_with_job_match`].
#[derive(Debug, Clone, PartialEq)]
pub enum JobMatchOutcome {
    /// The keyword match replaced the current record's match.
    Applied(KeywordMatch),
    /// There was no record to update; nothing changed.
    NoActiveAnalysis,
    /// The record changed while the match was running; the result was dropped.
    Superseded,
}

#[derive(Clone)]
pub struct AnalysisStore {
    state: Arc<Mutex<StoreState>>,
    engine: Arc<dyn AnalysisEngine>,
}

impl AnalysisStore {
    pub fn new(engine: Arc<dyn AnalysisEngine>) -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState::default())),
            engine,
        }
    }

    pub fn engine(&self) -> Arc<dyn AnalysisEngine> {
        Arc::clone(&self.engine)
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_analysis_data(&self, record: AnalysisRecord) {
        let mut state = self.state();
        state.analysis_data = Some(record);
        state.generation += 1;
        debug!("Analysis data replaced (generation {})", state.generation);
    }

    /// Setting the flag marks a new analysis as started, which supersedes any
    /// job match still in flight.
    pub fn set_is_analyzing(&self, flag: bool) {
        let mut state = self.state();
        state.analysis_in_flight = flag;
        if flag {
            state.generation += 1;
        }
    }

    pub fn set_job_description(&self, text: impl Into<String>) {
        self.state().job_description = text.into();
    }

    /// Re-run keyword matching for `job_description` and merge the result
    /// into the current record.
    ///
    /// Only one match may be pending per store, and none while a resume
    /// analysis is running; both cases fail with [`ResumeAnalyzerError::Busy`].
    pub async fn update_analysis_with_job_match(&self, job_description: &str) -> Result<JobMatchOutcome> {
        let ticket = {
            let mut state = self.state();
            if state.analysis_data.is_none() {
                debug!("Job match requested with no active analysis");
                return Ok(JobMatchOutcome::NoActiveAnalysis);
            }
            if state.analysis_in_flight {
                return Err(ResumeAnalyzerError::Busy(
                    "a resume analysis is still running".to_string(),
                ));
            }
            if state.pending_match.is_some() {
                return Err(ResumeAnalyzerError::Busy(
                    "a job description match is already running".to_string(),
                ));
            }
            state.pending_match = Some(state.generation);
            state.generation
        };

        let result = self.engine.match_keywords(job_description).await;

        let mut state = self.state();
        state.pending_match = None;

        if state.generation != ticket {
            info!("Discarding keyword match from a superseded analysis");
            return Ok(JobMatchOutcome::Superseded);
        }

        let keyword_match = result.map_err(|e| {
            warn!("Keyword matching failed: {}", e);
            e
        })?;

        // The record cannot disappear: only set_analysis_data touches it and
        // that would have moved the generation.
        if let Some(current) = state.analysis_data.take() {
            state.analysis_data = Some(current.with_keyword_match(keyword_match.clone()));
        }
        info!("Keyword match applied: {}%", keyword_match.percentage);
        Ok(JobMatchOutcome::Applied(keyword_match))
    }

    pub fn analysis_data(&self) -> Option<AnalysisRecord> {
        self.state().analysis_data.clone()
    }

    pub fn is_analyzing(&self) -> bool {
        self.state().is_analyzing()
    }

    pub fn job_description(&self) -> String {
        self.state().job_description.clone()
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.state();
        StoreSnapshot {
            analysis_data: state.analysis_data.clone(),
            is_analyzing: state.is_analyzing(),
            job_description: state.job_description.clone(),
        }
    }
}
