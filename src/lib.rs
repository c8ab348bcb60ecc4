//! Resume analyzer library

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod store;
pub mod workflow;

pub use config::Config;
pub use error::{Result, ResumeAnalyzerError};
pub use store::AnalysisStore;
