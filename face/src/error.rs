use thiserror::Error;

/// Errors returned by the face pipeline.
#[derive(Debug, Error)]
pub enum FaceError {
    #[error("face: cannot decode image: {0}")]
    Decode(String),

    #[error("face: no face detected")]
    NoFace,

    #[error("face: non-frontal face (eye-to-nose ratio {ratio:.3})")]
    NonFrontal { ratio: f64 },

    #[error("face: expected 68 landmarks, got {0}")]
    LandmarkCount(usize),

    #[error("face: landmark detector: {0}")]
    Detector(String),

    #[error("face: ratio {index} is not finite ({value})")]
    NonFinite { index: usize, value: f64 },

    #[error("face: artifact {name}: {reason}")]
    Artifact { name: String, reason: String },
}

impl FaceError {
    pub(crate) fn artifact(name: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Artifact {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}
