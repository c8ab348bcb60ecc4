//! Display helpers shared by every formatter: score tiers, view selection,
//! keyword chips and section names.

use crate::analysis::AnalysisRecord;
use crate::store::StoreSnapshot;
use colored::Color;

/// Keyword chips shown before collapsing the rest into "+N more".
pub const VISIBLE_KEYWORDS: usize = 3;

/// Bucket for any displayed 0-100 score. The same thresholds apply to the
/// overall score, section scores and the keyword match bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    Excellent,
    Good,
    Average,
    NeedsImprovement,
}

impl ScoreTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => ScoreTier::Excellent,
            60..=79 => ScoreTier::Good,
            40..=59 => ScoreTier::Average,
            _ => ScoreTier::NeedsImprovement,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreTier::Excellent => "Excellent",
            ScoreTier::Good => "Good",
            ScoreTier::Average => "Average",
            ScoreTier::NeedsImprovement => "Needs Improvement",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            ScoreTier::Excellent => Color::Green,
            ScoreTier::Good => Color::Blue,
            ScoreTier::Average => Color::Yellow,
            ScoreTier::NeedsImprovement => Color::Red,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ScoreTier::Excellent => "tier-excellent",
            ScoreTier::Good => "tier-good",
            ScoreTier::Average => "tier-average",
            ScoreTier::NeedsImprovement => "tier-poor",
        }
    }

    pub fn markdown_badge(&self) -> &'static str {
        match self {
            ScoreTier::Excellent => "🟢 Excellent",
            ScoreTier::Good => "🔵 Good",
            ScoreTier::Average => "🟡 Average",
            ScoreTier::NeedsImprovement => "🔴 Needs Improvement",
        }
    }
}

/// Which panel to show for the current store state.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisView<'a> {
    Loading,
    Empty,
    Results(&'a AnalysisRecord),
}

impl<'a> AnalysisView<'a> {
    pub fn from_snapshot(snapshot: &'a StoreSnapshot) -> Self {
        if snapshot.is_analyzing {
            return AnalysisView::Loading;
        }
        match &snapshot.analysis_data {
            Some(record) => AnalysisView::Results(record),
            None => AnalysisView::Empty,
        }
    }
}

/// First few keywords plus how many were left out.
pub fn keyword_chips(keywords: &[String]) -> (&[String], usize) {
    let shown = keywords.len().min(VISIBLE_KEYWORDS);
    (&keywords[..shown], keywords.len() - shown)
}

/// `work_experience` -> `Work Experience`
pub fn format_section_name(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
