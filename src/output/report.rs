//! Report structure handed to the formatters

use crate::analysis::AnalysisRecord;
use crate::store::StoreSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Analysis plus what was analyzed and when
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub analysis: AnalysisRecord,

    /// Job description the keyword match was computed for, if any
    pub job_description: Option<String>,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub analyzer_version: String,
    pub resume_file: String,
    pub processing_time_ms: u64,
}

impl AnalysisReport {
    pub fn new(
        analysis: AnalysisRecord,
        resume_file: impl Into<String>,
        job_description: Option<String>,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            analysis,
            job_description: job_description.filter(|jd| !jd.trim().is_empty()),
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                analyzer_version: env!("CARGO_PKG_VERSION").to_string(),
                resume_file: resume_file.into(),
                processing_time_ms,
            },
        }
    }

    /// Report for whatever the store currently holds; `None` before any
    /// analysis has completed.
    pub fn from_snapshot(
        snapshot: &StoreSnapshot,
        resume_file: impl Into<String>,
        processing_time_ms: u64,
    ) -> Option<Self> {
        let analysis = snapshot.analysis_data.clone()?;
        Some(Self::new(
            analysis,
            resume_file,
            Some(snapshot.job_description.clone()),
            processing_time_ms,
        ))
    }
}
