//! User-facing workflows driving the shared store

pub mod job_match;
pub mod upload;

pub use job_match::JobMatchWorkflow;
pub use upload::{UploadOutcome, UploadState, UploadStatus, UploadWorkflow};
