//! Error types for the exchange layer.

use thiserror::Error;

/// Errors that can occur while reading, validating, or submitting
/// tabular data.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// An error propagated from the CSV reader/writer.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An error propagated from the core domain layer.
    #[error("domain error: {0}")]
    Core(#[from] optisched_core::Error),

    /// The submission collaborator rejected a request.
    #[error("submission failed for {code}: {message}")]
    Submission { code: String, message: String },
}

impl ExchangeError {
    /// Returns `true` when the error came back from the submission
    /// collaborator, i.e. the batch should keep going.
    pub fn is_submission(&self) -> bool {
        matches!(self, Self::Submission { .. })
    }
}

/// Convenience alias for exchange results.
pub type ExchangeResult<T> = std::result::Result<T, ExchangeError>;
