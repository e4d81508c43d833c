//! Error types for the analysis pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Column not found. Available: {available:?}")]
    ColumnNotFound { available: Vec<String> },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No file uploaded")]
    EmptyUpload,

    #[error("No analyzed artifact available: {0}")]
    ArtifactNotFound(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
