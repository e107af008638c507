use thiserror::Error;

/// Errors returned by classifier loading and inference.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classifier: read model: {0}")]
    Io(#[from] std::io::Error),

    #[error("classifier: parse model: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("classifier: invalid model: {0}")]
    InvalidModel(String),

    #[error("classifier: feature shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch { expected: Vec<usize>, got: Vec<usize> },

    #[error("classifier: feature {index} is not finite ({value})")]
    NonFinite { index: usize, value: f64 },

    #[error("classifier: probability {0} outside [0, 1]")]
    ProbabilityOutOfRange(f64),
}
