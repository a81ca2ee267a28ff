use thiserror::Error;

/// Everything that can go wrong while evaluating a loss or reading its inputs.
#[derive(Debug, Error)]
pub enum LossError {
    #[error("length mismatch: {labels} labels but {predictions} predictions")]
    LengthMismatch { labels: usize, predictions: usize },

    /// A prediction the configured log policy cannot take the logarithm of.
    #[error("prediction {value} at index {index} is outside the log domain")]
    Domain { index: usize, value: f64 },

    #[error("cannot evaluate cross-entropy over an empty input")]
    EmptyInput,

    #[error("label {value} at index {index} is not finite")]
    NonFiniteLabel { index: usize, value: f64 },

    #[error("invalid loss configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LossError>;
