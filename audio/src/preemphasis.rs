//! Spectrum-adaptive pre-emphasis.
//!
//! The filter coefficient depends on how much energy the recording already
//! has in the upper half of the spectrum: dull recordings get a stronger
//! high-pass, bright ones a gentler one.

use tracing::debug;

use crate::mfcc::Stft;

const N_FFT: usize = 2048;
const HOP: usize = 512;

/// Chooses the pre-emphasis coefficient from the high/low band ratio.
///
/// The ratio is the mean STFT magnitude of bins `[N_FFT/4, N_FFT/2]`
/// divided by that of bins `[0, N_FFT/4)`.
pub fn adaptive_alpha(samples: &[f32]) -> f64 {
    let spec = Stft::new(N_FFT, HOP).spectrogram(samples, 1);
    let split = N_FFT / 4;
    let low = spec.slice(ndarray::s![..split, ..]);
    let high = spec.slice(ndarray::s![split.., ..]);
    let low_mean = low.mean().unwrap_or(0.0);
    let high_mean = high.mean().unwrap_or(0.0);
    let ratio = high_mean / low_mean;

    let alpha = alpha_for_ratio(ratio);
    debug!(ratio, alpha, "pre-emphasis coefficient");
    alpha
}

fn alpha_for_ratio(ratio: f64) -> f64 {
    // NaN (silent input) falls through every comparison.
    if ratio < 0.1 {
        0.97
    } else if ratio < 0.3 {
        0.95
    } else {
        0.90
    }
}

/// `y[0] = x[0]`, `y[n] = x[n] - alpha * x[n - 1]`.
pub fn apply_preemphasis(samples: &[f32], alpha: f64) -> Vec<f32> {
    let mut out = Vec::with_capacity(samples.len());
    if let Some(&first) = samples.first() {
        out.push(first);
    }
    for w in samples.windows(2) {
        out.push((w[1] as f64 - alpha * w[0] as f64) as f32);
    }
    out
}

/// Adaptive coefficient followed by filtering.
pub fn adaptive_preemphasis(samples: &[f32]) -> Vec<f32> {
    apply_preemphasis(samples, adaptive_alpha(samples))
}
