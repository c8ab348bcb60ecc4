//! Analysis layer: result types, the engine interface and its mock backend

pub mod engine;
pub mod keywords;
pub mod record;

pub use engine::{AnalysisEngine, MockAnalysisEngine};
pub use record::{AnalysisRecord, KeywordMatch, ResumeFile};
