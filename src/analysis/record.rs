//! Analysis result types shared by the engine, the store and the formatters

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Full result bundle for one resume evaluation.
///
/// Records are snapshots: updates build a new record and replace the old one
/// wholesale rather than mutating it in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    /// Overall score (0-100)
    pub overall_score: u8,
    pub keyword_match: KeywordMatch,
    /// Per-section score (0-100), keyed by section name
    pub section_scores: BTreeMap<String, u8>,
    /// Feedback per section; a section without an entry has no feedback
    pub suggestions: BTreeMap<String, Vec<String>>,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordMatch {
    /// Match percentage (0-100)
    pub percentage: u8,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

impl AnalysisRecord {
    /// Feedback for a section, empty when none was produced.
    pub fn suggestions_for(&self, section: &str) -> &[String] {
        self.suggestions
            .get(section)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Copy of this record with only the keyword match replaced.
    pub fn with_keyword_match(&self, keyword_match: KeywordMatch) -> Self {
        Self {
            keyword_match,
            ..self.clone()
        }
    }
}

impl KeywordMatch {
    /// Build a match, deriving the percentage from the list sizes.
    pub fn from_lists(matched: Vec<String>, missing: Vec<String>) -> Self {
        let percentage = match_percentage(matched.len(), missing.len());
        Self {
            percentage,
            matched,
            missing,
        }
    }
}

/// `floor(100 * matched / (matched + missing))`, capped at 100 and 0 when
/// both counts are zero.
pub fn match_percentage(matched: usize, missing: usize) -> u8 {
    let total = matched + missing;
    if total == 0 {
        return 0;
    }
    ((matched * 100) / total).min(100) as u8
}

/// Metadata of an uploaded resume. The engine never sees file contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeFile {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
}

impl ResumeFile {
    pub fn new(name: impl Into<String>, size_bytes: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            mime_type: mime_type.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> AnalysisRecord {
        let mut section_scores = BTreeMap::new();
        section_scores.insert("summary".to_string(), 72);
        section_scores.insert("skills".to_string(), 55);

        let mut suggestions = BTreeMap::new();
        suggestions.insert("summary".to_string(), vec!["Be concise".to_string()]);

        AnalysisRecord {
            overall_score: 70,
            keyword_match: KeywordMatch::from_lists(vec!["Rust".into()], vec!["Go".into()]),
            section_scores,
            suggestions,
            strengths: vec!["Clear layout".into()],
            improvements: vec![],
        }
    }

    #[test]
    fn test_percentage_edges() {
        assert_eq!(match_percentage(0, 0), 0);
        assert_eq!(match_percentage(3, 0), 100);
        assert_eq!(match_percentage(0, 4), 0);
        assert_eq!(match_percentage(2, 1), 66);
        assert_eq!(match_percentage(1, 2), 33);
    }

    #[test]
    fn test_missing_suggestions_are_empty() {
        let record = sample_record();
        assert_eq!(record.suggestions_for("summary").len(), 1);
        assert!(record.suggestions_for("skills").is_empty());
    }

    #[test]
    fn test_with_keyword_match_keeps_other_fields() {
        let record = sample_record();
        let updated = record.with_keyword_match(KeywordMatch::default());

        assert_eq!(updated.keyword_match.percentage, 0);
        assert_eq!(updated.overall_score, record.overall_score);
        assert_eq!(updated.section_scores, record.section_scores);
        assert_eq!(updated.strengths, record.strengths);
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert!(json.get("overallScore").is_some());
        assert!(json.get("keywordMatch").is_some());
        assert!(json.get("sectionScores").is_some());
    }
}
