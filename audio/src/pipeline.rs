use ndarray::{Array3, Axis};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::TARGET_SAMPLE_RATE;
use crate::decode::{Waveform, decode};
use crate::error::AudioError;
use crate::length::{Truncate, fit_frames, fit_length};
use crate::loudness::{peak_normalize, rms_normalize};
use crate::mfcc::{Mfcc, MfccConfig};
use crate::preemphasis::adaptive_preemphasis;
use crate::resample::resample;
use crate::silence::{split, trim_edges};
use crate::standardize::MfccNormalization;

/// Amplitude normalization step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Loudness {
    Rms { target_db: f64 },
    Peak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreEmphasis {
    Off,
    Adaptive,
}

/// Silence removal step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SilenceTrim {
    Off,
    /// Keep every non-silent interval.
    Split { top_db: f64 },
    /// Drop leading and trailing silence only.
    Edges { top_db: f64 },
}

/// Where the output length is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FixedLength {
    /// Fit the waveform before feature extraction.
    Samples { count: usize, truncate: Truncate },
    /// Fit the MFCC frame axis after extraction.
    Frames { count: usize },
}

/// Full description of one speech pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioConfig {
    pub loudness: Loudness,
    pub preemphasis: PreEmphasis,
    pub silence: SilenceTrim,
    pub length: FixedLength,
    pub mfcc: MfccConfig,
}

/// Named pipeline presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AudioVariant {
    /// RMS -20 dB, adaptive pre-emphasis, interval split, 20 s, 13 MFCC.
    #[default]
    Canonical,
    /// Peak normalization, edge trim, 20 MFCC over 236 frames.
    LegacyPeak,
}

impl AudioVariant {
    pub fn config(self) -> AudioConfig {
        match self {
            Self::Canonical => AudioConfig {
                loudness: Loudness::Rms { target_db: -20.0 },
                preemphasis: PreEmphasis::Adaptive,
                silence: SilenceTrim::Split { top_db: 20.0 },
                length: FixedLength::Samples {
                    count: 20 * TARGET_SAMPLE_RATE as usize,
                    truncate: Truncate::Head,
                },
                mfcc: MfccConfig::default(),
            },
            Self::LegacyPeak => AudioConfig {
                loudness: Loudness::Peak,
                preemphasis: PreEmphasis::Off,
                silence: SilenceTrim::Edges { top_db: 20.0 },
                length: FixedLength::Frames { count: 236 },
                mfcc: MfccConfig {
                    n_mfcc: 20,
                    ..MfccConfig::default()
                },
            },
        }
    }
}

/// Bytes -> standardized `[1, n_mfcc, frames]` tensor.
pub struct AudioPipeline {
    config: AudioConfig,
    mfcc: Mfcc,
    normalization: MfccNormalization,
}

impl AudioPipeline {
    pub fn new(config: AudioConfig, normalization: MfccNormalization) -> Result<Self, AudioError> {
        if config.mfcc.sample_rate != TARGET_SAMPLE_RATE {
            return Err(AudioError::Config(format!(
                "mfcc sample rate must be {TARGET_SAMPLE_RATE}, got {}",
                config.mfcc.sample_rate
            )));
        }
        if config.mfcc.n_mfcc == 0 || config.mfcc.n_mfcc > config.mfcc.n_mels {
            return Err(AudioError::Config(format!(
                "n_mfcc must be in 1..={}, got {}",
                config.mfcc.n_mels, config.mfcc.n_mfcc
            )));
        }
        match config.length {
            FixedLength::Samples { count: 0, .. } | FixedLength::Frames { count: 0 } => {
                return Err(AudioError::Config("fixed length must be positive".into()));
            }
            _ => {}
        }
        if let MfccNormalization::Stored(stats) = &normalization {
            if stats.len() != config.mfcc.n_mfcc {
                return Err(AudioError::Config(format!(
                    "mfcc stats cover {} coefficients, pipeline produces {}",
                    stats.len(),
                    config.mfcc.n_mfcc
                )));
            }
        }
        let mfcc = Mfcc::new(config.mfcc.clone());
        Ok(Self {
            config,
            mfcc,
            normalization,
        })
    }

    pub fn config(&self) -> &AudioConfig {
        &self.config
    }

    /// Shape of every tensor this pipeline returns.
    pub fn output_shape(&self) -> [usize; 3] {
        let frames = match self.config.length {
            FixedLength::Samples { count, .. } => self.mfcc.frames_for(count),
            FixedLength::Frames { count } => count,
        };
        [1, self.config.mfcc.n_mfcc, frames]
    }

    pub fn process(&self, bytes: &[u8]) -> Result<Array3<f64>, AudioError> {
        let waveform = decode(bytes)?;
        self.process_waveform(waveform)
    }

    pub fn process_waveform(&self, waveform: Waveform) -> Result<Array3<f64>, AudioError> {
        if let Some(index) = waveform.samples.iter().position(|s| !s.is_finite()) {
            return Err(AudioError::NonFiniteSample { index });
        }
        let mut y = resample(&waveform.samples, waveform.sample_rate, TARGET_SAMPLE_RATE)?;

        match self.config.loudness {
            Loudness::Rms { target_db } => rms_normalize(&mut y, target_db)?,
            Loudness::Peak => peak_normalize(&mut y)?,
        }

        if self.config.preemphasis == PreEmphasis::Adaptive {
            y = adaptive_preemphasis(&y);
        }

        let before = y.len();
        y = match self.config.silence {
            SilenceTrim::Off => y,
            SilenceTrim::Split { top_db } => split(&y, top_db),
            SilenceTrim::Edges { top_db } => trim_edges(&y, top_db),
        };
        debug!(before, after = y.len(), "silence removed");
        if y.is_empty() {
            return Err(AudioError::Silent);
        }

        if let FixedLength::Samples { count, truncate } = self.config.length {
            y = fit_length(&y, count, truncate);
        }

        let mut coeffs = self.mfcc.compute(&y);
        if let FixedLength::Frames { count } = self.config.length {
            coeffs = fit_frames(coeffs, count);
        }

        self.normalization.apply(&mut coeffs)?;

        if let Some(((coefficient, frame), _)) = coeffs.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(AudioError::NonFinite { coefficient, frame });
        }

        debug!(shape = ?coeffs.shape(), "mfcc features ready");
        Ok(coeffs.insert_axis(Axis(0)))
    }
}
