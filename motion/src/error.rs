use thiserror::Error;

/// Errors returned by the limb-motion pipeline.
#[derive(Debug, Error)]
pub enum MotionError {
    #[error("motion: read csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("motion: missing column {0:?}")]
    MissingColumn(String),

    #[error("motion: row {row}, column {column:?}: not a number: {value:?}")]
    InvalidValue { row: usize, column: String, value: String },

    #[error("motion: {samples} samples after resampling, need at least {window}")]
    TooShort { samples: usize, window: usize },

    #[error("motion: recording spans {secs} s, limit is {max} s")]
    TooLong { secs: f64, max: f64 },

    #[error("motion: SamplingTime decreases at row {row}")]
    NonMonotonicTime { row: usize },

    #[error("motion: artifact {name}: {reason}")]
    Artifact { name: String, reason: String },

    #[error("motion: feature {name} is not finite ({value})")]
    NonFinite { name: String, value: f64 },
}

impl MotionError {
    pub(crate) fn artifact(name: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Artifact {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}
