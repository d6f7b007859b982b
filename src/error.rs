//! Error types for the sentiment pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, SentimentyError>;

/// Main error type for the pipeline
#[derive(Error, Debug)]
pub enum SentimentyError {
    #[error("Schema error: {0}")]
    SchemaError(String),

    #[error("Artifact not found: {}. Train first with the `train` command.", .path.display())]
    ArtifactMissing { path: PathBuf },

    #[error("Label error: {0}")]
    LabelDomain(String),

    #[error("Empty result: {0}")]
    EmptyResult(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Model not fitted")]
    ModelNotFitted,

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<polars::error::PolarsError> for SentimentyError {
    fn from(err: polars::error::PolarsError) -> Self {
        SentimentyError::DataError(err.to_string())
    }
}

impl From<serde_json::Error> for SentimentyError {
    fn from(err: serde_json::Error) -> Self {
        SentimentyError::SerializationError(err.to_string())
    }
}

impl From<bincode::Error> for SentimentyError {
    fn from(err: bincode::Error) -> Self {
        SentimentyError::SerializationError(err.to_string())
    }
}
