//! Analysis engine interface and the mock backend standing in for it

use crate::analysis::keywords::KeywordMatcher;
use crate::analysis::record::{AnalysisRecord, KeywordMatch, ResumeFile};
use crate::config::AnalysisConfig;
use crate::error::Result;
use async_trait::async_trait;
use log::debug;
use rand::Rng;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::time::Duration;

/// Backend capable of scoring a resume and matching it against a job
/// description. The store and workflows only ever see this trait.
#[async_trait]
pub trait AnalysisEngine: Send + Sync {
    async fn analyze(&self, file: &ResumeFile) -> Result<AnalysisRecord>;

    async fn match_keywords(&self, job_description: &str) -> Result<KeywordMatch>;
}

pub const OVERALL_SCORE_RANGE: RangeInclusive<u8> = 60..=89;
pub const KEYWORD_PERCENTAGE_RANGE: RangeInclusive<u8> = 40..=89;

/// Score range for each section the mock reports on.
pub const SECTION_SCORE_RANGES: [(&str, RangeInclusive<u8>); 4] = [
    ("summary", 60..=89),
    ("experience", 70..=89),
    ("education", 60..=89),
    ("skills", 50..=89),
];

/// Randomized stand-in for a real resume analysis service.
///
/// Scores are drawn fresh from the thread-local RNG on every call; the lists
/// are fixed demonstration content and ignore the uploaded file.
pub struct MockAnalysisEngine {
    resume_delay: Duration,
    keyword_delay: Duration,
    matcher: KeywordMatcher,
}

impl MockAnalysisEngine {
    pub fn new(config: &AnalysisConfig) -> Result<Self> {
        Ok(Self {
            resume_delay: config.resume_delay(),
            keyword_delay: config.keyword_delay(),
            matcher: KeywordMatcher::new()?,
        })
    }

    /// Engine that answers immediately.
    pub fn instant() -> Result<Self> {
        Self::new(&AnalysisConfig {
            resume_delay_ms: 0,
            keyword_delay_ms: 0,
        })
    }

    fn generate_record() -> AnalysisRecord {
        let mut rng = rand::thread_rng();

        let section_scores = SECTION_SCORE_RANGES
            .iter()
            .map(|(section, range)| (section.to_string(), rng.gen_range(range.clone())))
            .collect();

        AnalysisRecord {
            overall_score: rng.gen_range(OVERALL_SCORE_RANGE),
            keyword_match: KeywordMatch {
                percentage: rng.gen_range(KEYWORD_PERCENTAGE_RANGE),
                matched: to_strings(&["Python", "Data Analysis", "Machine Learning", "Communication"]),
                missing: to_strings(&["Docker", "AWS", "React"]),
            },
            section_scores,
            suggestions: default_suggestions(),
            strengths: to_strings(&[
                "Strong educational background",
                "Relevant work experience",
                "Clear project descriptions",
                "Good use of action verbs",
            ]),
            improvements: to_strings(&[
                "Add more quantifiable achievements",
                "Enhance your LinkedIn profile and add the URL",
                "Include a projects section to showcase practical skills",
                "Tailor your resume more specifically to the job description",
            ]),
        }
    }
}

#[async_trait]
impl AnalysisEngine for MockAnalysisEngine {
    async fn analyze(&self, file: &ResumeFile) -> Result<AnalysisRecord> {
        debug!("Mock analysis of {} ({} bytes)", file.name, file.size_bytes);
        tokio::time::sleep(self.resume_delay).await;
        Ok(Self::generate_record())
    }

    async fn match_keywords(&self, job_description: &str) -> Result<KeywordMatch> {
        debug!("Mock keyword match over {} characters", job_description.len());
        tokio::time::sleep(self.keyword_delay).await;
        let mut rng = rand::thread_rng();
        Ok(self.matcher.match_job_description(job_description, &mut rng))
    }
}

fn default_suggestions() -> BTreeMap<String, Vec<String>> {
    let mut suggestions = BTreeMap::new();
    suggestions.insert(
        "summary".to_string(),
        to_strings(&[
            "Add a more impactful opening statement that highlights your unique value proposition",
            "Quantify your achievements with specific metrics",
        ]),
    );
    suggestions.insert(
        "experience".to_string(),
        to_strings(&[
            "Include more action verbs to describe your responsibilities",
            "Add measurable achievements for each position",
        ]),
    );
    suggestions.insert(
        "education".to_string(),
        to_strings(&["List relevant coursework that aligns with the target position"]),
    );
    suggestions.insert(
        "skills".to_string(),
        to_strings(&[
            "Organize skills by category (technical, soft, domain-specific)",
            "Consider adding proficiency levels for technical skills",
        ]),
    );
    suggestions
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resume() -> ResumeFile {
        ResumeFile::new("resume.pdf", 2 * 1024 * 1024, "application/pdf")
    }

    #[tokio::test]
    async fn test_scores_stay_in_range() {
        let engine = MockAnalysisEngine::instant().unwrap();

        for _ in 0..100 {
            let record = engine.analyze(&resume()).await.unwrap();
            assert!(OVERALL_SCORE_RANGE.contains(&record.overall_score));
            assert!(KEYWORD_PERCENTAGE_RANGE.contains(&record.keyword_match.percentage));
            assert_eq!(record.section_scores.len(), SECTION_SCORE_RANGES.len());
            for (section, range) in SECTION_SCORE_RANGES.iter() {
                let score = record.section_scores[*section];
                assert!(range.contains(&score), "{} score {} out of range", section, score);
            }
        }
    }

    #[tokio::test]
    async fn test_static_content_is_stable() {
        let engine = MockAnalysisEngine::instant().unwrap();
        let first = engine.analyze(&resume()).await.unwrap();
        let second = engine.analyze(&resume()).await.unwrap();

        assert_eq!(first.suggestions, second.suggestions);
        assert_eq!(first.strengths, second.strengths);
        assert_eq!(first.improvements, second.improvements);
        assert_eq!(first.keyword_match.matched, second.keyword_match.matched);
        for section in first.section_scores.keys() {
            assert!(!first.suggestions_for(section).is_empty());
        }
    }

    #[tokio::test]
    async fn test_repeated_calls_vary() {
        let engine = MockAnalysisEngine::instant().unwrap();
        let mut overall = std::collections::HashSet::new();
        for _ in 0..50 {
            overall.insert(engine.analyze(&resume()).await.unwrap().overall_score);
        }
        assert!(overall.len() > 1);
    }

    #[tokio::test]
    async fn test_match_keywords_on_empty_text() {
        let engine = MockAnalysisEngine::instant().unwrap();
        let result = engine.match_keywords("").await.unwrap();
        assert!(result.percentage <= 100);
    }

    #[tokio::test(start_paused = true)]
    async fn test_analyze_waits_for_configured_delay() {
        let engine = MockAnalysisEngine::new(&AnalysisConfig {
            resume_delay_ms: 1500,
            keyword_delay_ms: 1500,
        })
        .unwrap();

        let start = tokio::time::Instant::now();
        engine.analyze(&resume()).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(1500));
    }
}
