//! Error types for grid-stitch services.

use thiserror::Error;

/// Result type alias using StitchError.
pub type StitchResult<T> = Result<T, StitchError>;

/// Primary error type for aggregation operations.
#[derive(Debug, Error)]
pub enum StitchError {
    // === Configuration Errors (surfaced at view construction) ===
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("axis '{axis}' of dataset '{dataset}' is not strictly ascending at index {index}")]
    UnsortedAxis {
        dataset: String,
        axis: String,
        index: usize,
    },

    #[error("shared dimension mismatch between '{left}' and '{right}': {detail}")]
    DimensionMismatch {
        left: String,
        right: String,
        detail: String,
    },

    #[error("variable '{variable}' is provided by both '{first}' and '{second}'")]
    DuplicateVariable {
        variable: String,
        first: String,
        second: String,
    },

    // === Request Errors ===
    #[error("variable not found: {0}")]
    VariableNotFound(String),

    #[error("invalid slice {start}:{stride}:{stop} for axis of length {len}")]
    InvalidSlice {
        start: usize,
        stride: usize,
        stop: usize,
        len: usize,
    },

    #[error("request for {requested} positions exceeds limit of {limit}")]
    RequestTooLarge { requested: usize, limit: usize },

    #[error("dataset not found: {0}")]
    NotFound(String),

    // === Data Errors ===
    #[error("failed to read data: {0}")]
    ReadFailed(String),

    #[error("internal consistency error: {0}")]
    Inconsistency(String),
}

impl StitchError {
    /// Create a Configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a ReadFailed error.
    pub fn read_failed(msg: impl Into<String>) -> Self {
        Self::ReadFailed(msg.into())
    }

    /// Create an Inconsistency error.
    pub fn inconsistency(msg: impl Into<String>) -> Self {
        Self::Inconsistency(msg.into())
    }

    /// True for errors that can only arise while building a view.
    ///
    /// Construction-time errors abort view creation entirely; read-time
    /// errors propagate to the caller of the failing request.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            StitchError::Configuration(_)
                | StitchError::UnsortedAxis { .. }
                | StitchError::DimensionMismatch { .. }
                | StitchError::DuplicateVariable { .. }
        )
    }
}

// Conversion from common error types
impl From<std::io::Error> for StitchError {
    fn from(err: std::io::Error) -> Self {
        StitchError::ReadFailed(err.to_string())
    }
}

impl From<serde_json::Error> for StitchError {
    fn from(err: serde_json::Error) -> Self {
        StitchError::Configuration(format!("JSON error: {}", err))
    }
}
