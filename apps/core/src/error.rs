use std::io;
use thiserror::Error;

/// Application-wide error type for the sampling pipeline.
///
/// The classifiers themselves never fail; everything here comes from I/O,
/// input parsing, configuration or output encoding.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A line of the sessions file is not a valid session object.
    #[error("Malformed session record on line {line}: {source}")]
    MalformedRecord {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Represents configuration-related errors (e.g., missing input file).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents data validation errors (e.g., out of range settings).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Nothing was sampled, so there is nothing to classify or write.
    #[error("No data found: no user queries were sampled")]
    NoData,

    /// Represents unexpected internal errors (output encoding, logging setup).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}

impl From<arrow::error::ArrowError> for AppError {
    fn from(err: arrow::error::ArrowError) -> Self {
        AppError::Internal(format!("Arrow error: {}", err))
    }
}
