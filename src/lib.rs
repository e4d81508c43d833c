//! Review Sentiment Analyzer
//!
//! Scores free-text review exports, aggregates them into a report and writes
//! an annotated spreadsheet per analysis.

pub mod aggregate;
pub mod analyzer;
pub mod artifact;
pub mod columns;
pub mod config;
pub mod error;
pub mod report;
pub mod scorer;
pub mod table;
pub mod trend;
pub mod types;
pub mod words;

#[cfg(test)]
mod error_tests;

pub use artifact::{ArtifactHandle, ArtifactStore};
pub use error::{AnalysisError, Result};
pub use report::{AnalysisResponse, ErrorDocument, Report, ReportAssembler};
pub use scorer::{LexiconScorer, Polarity, TextScorer};
pub use types::{Dataset, SentimentCategory, Table};
