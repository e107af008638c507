use thiserror::Error;

/// Errors returned by the speech pipeline.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio: cannot decode: {0}")]
    Decode(String),

    #[error("audio: resample {from} Hz -> {to} Hz: {reason}")]
    Resample { from: u32, to: u32, reason: String },

    #[error("audio: sample {index} is not finite")]
    NonFiniteSample { index: usize },

    #[error("audio: recording is silent")]
    Silent,

    #[error("audio: non-finite MFCC value at coefficient {coefficient}, frame {frame}")]
    NonFinite { coefficient: usize, frame: usize },

    #[error("audio: invalid configuration: {0}")]
    Config(String),
}
