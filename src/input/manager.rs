//! Input manager: turns paths on disk into uploads and job description text

use crate::analysis::ResumeFile;
use crate::error::{Result, ResumeAnalyzerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PlainTextExtractor, TextExtractor};
use log::info;
use std::collections::HashMap;
use std::path::Path;

pub struct InputManager {
    /// Job description text by path.
    cache: HashMap<String, String>,
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Describe a resume on disk the way an upload would: name, size and a
    /// MIME type derived from the extension. Contents are not read.
    pub async fn resume_file(&self, path: &Path) -> Result<ResumeFile> {
        let metadata = tokio::fs::metadata(path).await.map_err(|e| {
            ResumeAnalyzerError::InvalidInput(format!("Cannot read {}: {}", path.display(), e))
        })?;
        if !metadata.is_file() {
            return Err(ResumeAnalyzerError::InvalidInput(format!(
                "Not a file: {}",
                path.display()
            )));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(ResumeFile::new(
            name,
            metadata.len(),
            FileType::from_path(path).mime_type(),
        ))
    }

    pub async fn job_description(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if let Some(cached_text) = self.cache.get(&path_str) {
            info!("Using cached text for: {}", path.display());
            return Ok(cached_text.clone());
        }

        if !path.exists() {
            return Err(ResumeAnalyzerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let text = match FileType::from_path(path) {
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            _ => {
                return Err(ResumeAnalyzerError::InvalidInput(format!(
                    "Job description must be a .txt or .md file: {}",
                    path.display()
                )));
            }
        };

        self.cache.insert(path_str, text.clone());
        Ok(text)
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
