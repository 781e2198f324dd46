use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error("section identifier already in use: {identifier}")]
    DuplicateSection { identifier: String },

    #[error("an instructor must be assigned to the section")]
    MissingInstructor,

    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("split durations sum to {actual} but the course duration is {declared}")]
    SplitInvariant { declared: f64, actual: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl Error {
    /// Returns `true` when the error is a per-field validation failure
    /// (as opposed to a structural one such as a missing entity).
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
