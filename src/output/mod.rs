//! Presentation layer: score tiers, view selection, reports and formatters

pub mod formatter;
pub mod report;
pub mod view;

pub use formatter::{OutputFormatter, ReportGenerator};
pub use report::AnalysisReport;
pub use view::{AnalysisView, ScoreTier};
