//! Per-coefficient standardization of MFCC matrices.

use std::path::Path;

use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::AudioError;

const EPS: f64 = 1e-8;

/// Training-set statistics, one entry per coefficient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MfccStats {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl MfccStats {
    pub fn from_json(data: &str) -> Result<Self, AudioError> {
        let stats: Self =
            serde_json::from_str(data).map_err(|e| AudioError::Config(format!("mfcc stats: {e}")))?;
        stats.validate()?;
        Ok(stats)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AudioError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .map_err(|e| AudioError::Config(format!("mfcc stats {}: {e}", path.display())))?;
        Self::from_json(&data)
    }

    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    fn validate(&self) -> Result<(), AudioError> {
        if self.mean.len() != self.std.len() {
            return Err(AudioError::Config(format!(
                "mfcc stats: {} means but {} stds",
                self.mean.len(),
                self.std.len()
            )));
        }
        if self.mean.iter().chain(&self.std).any(|v| !v.is_finite()) {
            return Err(AudioError::Config("mfcc stats: non-finite value".into()));
        }
        Ok(())
    }
}

/// Where the standardization statistics come from.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MfccNormalization {
    /// Statistics stored at training time.
    Stored(MfccStats),
    /// Statistics of the recording itself, over its frames.
    #[default]
    PerUtterance,
}

impl MfccNormalization {
    /// Standardizes each coefficient row of `[n_mfcc, frames]` in place.
    pub fn apply(&self, mfcc: &mut Array2<f64>) -> Result<(), AudioError> {
        match self {
            Self::Stored(stats) => {
                if stats.len() != mfcc.nrows() {
                    return Err(AudioError::Config(format!(
                        "mfcc stats cover {} coefficients, features have {}",
                        stats.len(),
                        mfcc.nrows()
                    )));
                }
                for (i, mut row) in mfcc.axis_iter_mut(Axis(0)).enumerate() {
                    let (mean, std) = (stats.mean[i], stats.std[i]);
                    row.mapv_inplace(|v| (v - mean) / (std + EPS));
                }
            }
            Self::PerUtterance => {
                for mut row in mfcc.axis_iter_mut(Axis(0)) {
                    let mean = row.mean().unwrap_or(0.0);
                    let std = row.std(0.0);
                    row.mapv_inplace(|v| (v - mean) / (std + EPS));
                }
            }
        }
        Ok(())
    }
}
