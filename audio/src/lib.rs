//! Speech feature pipeline.
//!
//! Turns an encoded speech recording into the standardized MFCC tensor a
//! speech classifier was trained on.
//!
//! # Pipeline
//!
//! 1. [`decode`]: WAV/FLAC/MP3/OGG bytes -> mono f32 waveform at native rate
//! 2. [`resample`]: native rate -> 16 kHz
//! 3. [`loudness`]: RMS (target dB) or peak normalization
//! 4. [`preemphasis`]: adaptive first-order high-pass
//! 5. [`silence`]: drop silent intervals (or only the edges)
//! 6. [`length`]: zero-pad or truncate to a fixed duration
//! 7. [`mfcc`]: Slaney mel spectrogram -> dB -> orthonormal DCT-II
//! 8. [`standardize`]: per-coefficient mean/std
//!
//! [`AudioPipeline`] composes the steps; [`AudioVariant`] names the two
//! supported step orders.
//!
//! # Example
//!
//! ```no_run
//! use medai_audio::{AudioPipeline, AudioVariant, MfccNormalization};
//!
//! let pipeline = AudioPipeline::new(
//!     AudioVariant::Canonical.config(),
//!     MfccNormalization::PerUtterance,
//! ).unwrap();
//! let bytes = std::fs::read("speech.wav").unwrap();
//! let mfcc = pipeline.process(&bytes).unwrap();
//! assert_eq!(mfcc.shape(), &[1, 13, 626]);
//! ```

pub mod decode;
mod error;
pub mod length;
pub mod loudness;
pub mod mfcc;
mod pipeline;
pub mod preemphasis;
pub mod resample;
pub mod silence;
pub mod standardize;
#[cfg(test)]
mod testutil;

pub use decode::{Waveform, decode};
pub use error::AudioError;
pub use length::Truncate;
pub use mfcc::{Mfcc, MfccConfig};
pub use pipeline::{AudioConfig, AudioPipeline, AudioVariant, FixedLength, Loudness, PreEmphasis, SilenceTrim};
pub use standardize::{MfccNormalization, MfccStats};

/// Sample rate every pipeline variant works at.
pub const TARGET_SAMPLE_RATE: u32 = 16_000;
