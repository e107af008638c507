//! Fixed-length fitting for waveforms and coefficient matrices.

use ndarray::{Array2, s};
use serde::{Deserialize, Serialize};

/// Which part of an over-long input is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Truncate {
    #[default]
    Head,
    Center,
}

/// Zero-pads at the end or truncates to exactly `len` samples.
pub fn fit_length(samples: &[f32], len: usize, truncate: Truncate) -> Vec<f32> {
    if samples.len() >= len {
        let start = match truncate {
            Truncate::Head => 0,
            Truncate::Center => (samples.len() - len) / 2,
        };
        return samples[start..start + len].to_vec();
    }
    let mut out = samples.to_vec();
    out.resize(len, 0.0);
    out
}

/// Zero-pads or truncates the frame (column) axis to `frames`.
pub fn fit_frames(matrix: Array2<f64>, frames: usize) -> Array2<f64> {
    let (rows, cols) = matrix.dim();
    if cols == frames {
        return matrix;
    }
    if cols > frames {
        return matrix.slice(s![.., ..frames]).to_owned();
    }
    let mut out = Array2::zeros((rows, frames));
    out.slice_mut(s![.., ..cols]).assign(&matrix);
    out
}
