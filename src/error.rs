//! Error handling for the resume analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeAnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The upload's MIME type is not one of the accepted resume formats.
    #[error("Invalid file type. Please upload a PDF, DOC, DOCX, or TXT file.")]
    InvalidType(String),

    /// The upload exceeds the size limit; carries the offending size in bytes.
    #[error("File too large. Maximum file size is 5MB.")]
    TooLarge(u64),

    #[error("Processing failed: {0}")]
    ProcessingFailed(String),

    #[error("No active analysis: upload a resume first")]
    NoActiveAnalysis,

    #[error("Operation already in progress: {0}")]
    Busy(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

impl ResumeAnalyzerError {
    /// Errors the user recovers from by picking another file or retrying.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ResumeAnalyzerError::InvalidType(_)
                | ResumeAnalyzerError::TooLarge(_)
                | ResumeAnalyzerError::ProcessingFailed(_)
                | ResumeAnalyzerError::Busy(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ResumeAnalyzerError>;
