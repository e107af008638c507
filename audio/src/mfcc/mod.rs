//! Mel-frequency cepstral coefficients.
//!
//! Power spectrogram, Slaney mel filterbank, power-to-dB with an 80 dB
//! dynamic range clamp, then an orthonormal DCT-II over the mel axis.

mod dct;
mod mel;
pub mod stft;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::TARGET_SAMPLE_RATE;
pub use dct::dct_matrix;
pub use mel::{hz_to_mel, mel_filterbank, mel_to_hz};
pub use stft::{Stft, frame_count, hann_window};

/// Floor applied to mel power before taking the log.
const AMIN: f64 = 1e-10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MfccConfig {
    pub sample_rate: u32,
    pub n_mfcc: usize,
    pub n_fft: usize,
    pub hop_length: usize,
    pub n_mels: usize,
    pub f_min: f64,
    /// Upper band edge; `None` means Nyquist.
    pub f_max: Option<f64>,
    /// Dynamic range kept below the loudest mel bin, in dB.
    pub top_db: Option<f64>,
}

impl Default for MfccConfig {
    fn default() -> Self {
        Self {
            sample_rate: TARGET_SAMPLE_RATE,
            n_mfcc: 13,
            n_fft: 2048,
            hop_length: 512,
            n_mels: 128,
            f_min: 0.0,
            f_max: None,
            top_db: Some(80.0),
        }
    }
}

/// Precomputed MFCC extractor.
pub struct Mfcc {
    config: MfccConfig,
    stft: Stft,
    mel_basis: Array2<f64>,
    dct: Array2<f64>,
}

impl Mfcc {
    pub fn new(config: MfccConfig) -> Self {
        let f_max = config.f_max.unwrap_or(config.sample_rate as f64 / 2.0);
        let mel_basis = mel_filterbank(config.n_mels, config.n_fft, config.sample_rate, config.f_min, f_max);
        let dct = dct_matrix(config.n_mfcc, config.n_mels);
        let stft = Stft::new(config.n_fft, config.hop_length);
        Self {
            config,
            stft,
            mel_basis,
            dct,
        }
    }

    pub fn config(&self) -> &MfccConfig {
        &self.config
    }

    /// Frames produced for a signal of `len` samples.
    pub fn frames_for(&self, len: usize) -> usize {
        frame_count(len, self.config.hop_length)
    }

    /// Log-power mel spectrogram, `[n_mels, frames]`, in dB.
    pub fn log_mel(&self, samples: &[f32]) -> Array2<f64> {
        let power = self.stft.spectrogram(samples, 2);
        let mel = self.mel_basis.dot(&power);
        power_to_db(mel, self.config.top_db)
    }

    /// Returns `[n_mfcc, frames]`.
    pub fn compute(&self, samples: &[f32]) -> Array2<f64> {
        self.dct.dot(&self.log_mel(samples))
    }
}

/// `10 * log10(max(AMIN, x))` relative to a reference of 1, optionally
/// clamped to `top_db` below the maximum.
pub fn power_to_db(mut power: Array2<f64>, top_db: Option<f64>) -> Array2<f64> {
    power.mapv_inplace(|p| 10.0 * p.max(AMIN).log10());
    if let Some(range) = top_db {
        let floor = power.iter().cloned().fold(f64::NEG_INFINITY, f64::max) - range;
        power.mapv_inplace(|db| db.max(floor));
    }
    power
}
