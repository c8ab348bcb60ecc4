//! Upload validation: accepted resume formats and the size limit

use crate::analysis::ResumeFile;
use crate::error::{Result, ResumeAnalyzerError};

/// MIME types accepted as resumes: PDF, legacy Word, Word XML and plain text.
pub const ACCEPTED_MIME_TYPES: [&str; 4] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
];

/// Largest accepted upload, 5 MiB.
pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Check an upload's type, then its size. Pure; touches no state.
pub fn validate(file: &ResumeFile) -> Result<()> {
    if !ACCEPTED_MIME_TYPES.contains(&file.mime_type.as_str()) {
        return Err(ResumeAnalyzerError::InvalidType(file.mime_type.clone()));
    }
    if file.size_bytes > MAX_FILE_SIZE {
        return Err(ResumeAnalyzerError::TooLarge(file.size_bytes));
    }
    Ok(())
}
