use std::fmt;

use medai_audio::AudioError;
use medai_classifier::ClassifierError;
use medai_face::FaceError;
use medai_motion::MotionError;
use serde::Serialize;
use thiserror::Error;

use crate::modality::Modality;

/// Failure categories visible to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bytes that cannot be decoded or parsed into the expected structure.
    InputFormat,
    /// Well-formed input that cannot be screened (no face, silence, ...).
    ContentValidation,
    /// Non-finite values or shape mismatches inside a pipeline.
    NumericIntegrity,
    /// Configuration, artifact or classifier loading failure.
    ArtifactLoad,
}

impl ErrorKind {
    /// Errors the caller can fix by sending different input.
    pub fn is_caller_error(self) -> bool {
        matches!(self, Self::InputFormat | Self::ContentValidation)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::InputFormat => "input_format",
            Self::ContentValidation => "content_validation",
            Self::NumericIntegrity => "numeric_integrity",
            Self::ArtifactLoad => "artifact_load",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by the screening services.
#[derive(Debug, Error)]
pub enum ScreeningError {
    #[error(transparent)]
    Audio(#[from] AudioError),

    #[error(transparent)]
    Motion(#[from] MotionError),

    #[error(transparent)]
    Face(#[from] FaceError),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    #[error("config: {0}")]
    Config(String),

    #[error("screening: {0} modality is not configured")]
    NotConfigured(Modality),
}

impl ScreeningError {
    pub fn kind(&self) -> ErrorKind {
        use ErrorKind::*;
        match self {
            Self::Audio(e) => match e {
                AudioError::Decode(_) | AudioError::Resample { .. } => InputFormat,
                AudioError::Silent => ContentValidation,
                AudioError::NonFinite { .. } | AudioError::NonFiniteSample { .. } => NumericIntegrity,
                AudioError::Config(_) => ArtifactLoad,
            },
            Self::Motion(e) => match e {
                MotionError::Csv(_)
                | MotionError::MissingColumn(_)
                | MotionError::InvalidValue { .. }
                | MotionError::TooShort { .. }
                | MotionError::TooLong { .. }
                | MotionError::NonMonotonicTime { .. } => InputFormat,
                MotionError::NonFinite { .. } => NumericIntegrity,
                MotionError::Artifact { .. } => ArtifactLoad,
            },
            Self::Face(e) => match e {
                FaceError::Decode(_) => InputFormat,
                FaceError::NoFace | FaceError::NonFrontal { .. } => ContentValidation,
                FaceError::NonFinite { .. } | FaceError::LandmarkCount(_) | FaceError::Detector(_) => {
                    NumericIntegrity
                }
                FaceError::Artifact { .. } => ArtifactLoad,
            },
            Self::Classifier(e) => match e {
                ClassifierError::ShapeMismatch { .. }
                | ClassifierError::NonFinite { .. }
                | ClassifierError::ProbabilityOutOfRange(_) => NumericIntegrity,
                ClassifierError::Io(_) | ClassifierError::Parse(_) | ClassifierError::InvalidModel(_) => {
                    ArtifactLoad
                }
            },
            Self::Config(_) | Self::NotConfigured(_) => ArtifactLoad,
        }
    }
}
