//! Keyword extraction and randomized job-description matching

use crate::analysis::record::KeywordMatch;
use crate::error::{Result, ResumeAnalyzerError};
use aho_corasick::AhoCorasick;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Domain keywords the matcher knows about, in reporting order.
pub const KEYWORD_VOCABULARY: [&str; 20] = [
    "Python",
    "JavaScript",
    "React",
    "Node.js",
    "SQL",
    "NoSQL",
    "AWS",
    "Docker",
    "Kubernetes",
    "Machine Learning",
    "Data Analysis",
    "Communication",
    "Leadership",
    "Project Management",
    "Agile",
    "CI/CD",
    "Testing",
    "Git",
    "REST API",
    "TypeScript",
];

/// Unfound vocabulary entries appended to every extraction.
const PADDING_KEYWORDS: usize = 3;

/// Chance that an extracted keyword is reported as matched.
const MATCH_PROBABILITY: f64 = 0.6;

/// Upper bound on the number of missing keywords reported.
const MAX_MISSING: usize = 5;

/// Case-insensitive scanner over the keyword vocabulary
pub struct KeywordMatcher {
    scanner: AhoCorasick,
    vocabulary: Vec<String>,
}

impl KeywordMatcher {
    pub fn new() -> Result<Self> {
        Self::with_vocabulary(KEYWORD_VOCABULARY.iter().map(|k| k.to_string()).collect())
    }

    pub fn with_vocabulary(vocabulary: Vec<String>) -> Result<Self> {
        // Standard match kind so overlapping terms ("NoSQL" / "SQL") all report.
        let scanner = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&vocabulary)
            .map_err(|e| {
                ResumeAnalyzerError::ProcessingFailed(format!("Failed to build keyword scanner: {}", e))
            })?;

        Ok(Self { scanner, vocabulary })
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Vocabulary entries occurring in `text`, in vocabulary order.
    pub fn find_keywords(&self, text: &str) -> Vec<String> {
        let mut seen = vec![false; self.vocabulary.len()];
        for mat in self.scanner.find_overlapping_iter(text) {
            seen[mat.pattern().as_usize()] = true;
        }

        self.vocabulary
            .iter()
            .zip(seen)
            .filter(|(_, found)| *found)
            .map(|(keyword, _)| keyword.clone())
            .collect()
    }

    /// Keywords found in `text`, padded with a few random vocabulary entries
    /// that were not found.
    pub fn extract_keywords<R: Rng>(&self, text: &str, rng: &mut R) -> Vec<String> {
        let mut keywords = self.find_keywords(text);
        let found: HashSet<&String> = keywords.iter().collect();

        let mut padding: Vec<String> = self
            .vocabulary
            .iter()
            .filter(|k| !found.contains(k))
            .cloned()
            .collect();
        padding.shuffle(rng);
        padding.truncate(PADDING_KEYWORDS);

        keywords.extend(padding);
        keywords
    }

    /// Randomized matched/missing split for a job description.
    pub fn match_job_description<R: Rng>(&self, text: &str, rng: &mut R) -> KeywordMatch {
        let matched: Vec<String> = self
            .extract_keywords(text, rng)
            .into_iter()
            .filter(|_| rng.gen_bool(MATCH_PROBABILITY))
            .collect();

        let mut missing: Vec<String> = self
            .vocabulary
            .iter()
            .filter(|k| !matched.contains(k))
            .cloned()
            .collect();
        missing.shuffle(rng);
        let keep = rng.gen_range(1..=MAX_MISSING);
        missing.truncate(keep);

        KeywordMatch::from_lists(matched, missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_find_keywords_case_insensitive() {
        let matcher = KeywordMatcher::new().unwrap();
        let found = matcher.find_keywords("Looking for a PYTHON and aws engineer");

        assert_eq!(found, vec!["Python".to_string(), "AWS".to_string()]);
    }

    #[test]
    fn test_find_keywords_reports_overlaps() {
        let matcher = KeywordMatcher::new().unwrap();
        let found = matcher.find_keywords("Experience with NoSQL stores and GitHub");

        assert!(found.contains(&"NoSQL".to_string()));
        assert!(found.contains(&"SQL".to_string()));
        assert!(found.contains(&"Git".to_string()));
    }

    #[test]
    fn test_extract_pads_with_unfound_keywords() {
        let matcher = KeywordMatcher::new().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let keywords = matcher.extract_keywords("Docker and Kubernetes", &mut rng);

        assert_eq!(keywords.len(), 2 + PADDING_KEYWORDS);
        assert_eq!(&keywords[..2], &["Docker".to_string(), "Kubernetes".to_string()]);
        let unique: HashSet<_> = keywords.iter().collect();
        assert_eq!(unique.len(), keywords.len());
    }

    #[test]
    fn test_match_lists_are_disjoint_and_bounded() {
        let matcher = KeywordMatcher::new().unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let result = matcher.match_job_description("Python, SQL, Agile and Testing", &mut rng);
            assert!(!result.missing.is_empty());
            assert!(result.missing.len() <= MAX_MISSING);
            assert!(result.matched.len() <= 4 + PADDING_KEYWORDS);
            assert!(result.percentage <= 100);
            for keyword in &result.missing {
                assert!(!result.matched.contains(keyword));
            }
        }
    }

    #[test]
    fn test_empty_description_is_well_defined() {
        let matcher = KeywordMatcher::new().unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let result = matcher.match_job_description("", &mut rng);

        assert!(result.matched.len() <= PADDING_KEYWORDS);
        assert!(result.percentage <= 100);
    }

    #[test]
    fn test_empty_vocabulary_yields_zero_percentage() {
        let matcher = KeywordMatcher::with_vocabulary(Vec::new()).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let result = matcher.match_job_description("anything", &mut rng);

        assert!(result.matched.is_empty());
        assert!(result.missing.is_empty());
        assert_eq!(result.percentage, 0);
    }
}
