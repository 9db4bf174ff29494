//! Error types for the resume profiler

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeProfilerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Output format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeProfilerError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for ResumeProfilerError {
    fn from(err: anyhow::Error) -> Self {
        ResumeProfilerError::Extraction(err.to_string())
    }
}
