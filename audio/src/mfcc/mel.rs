//! Slaney-style mel scale and area-normalized triangular filterbank.
//!
//! Linear below 1 kHz (200/3 Hz per mel), logarithmic above, with each
//! triangle scaled by `2 / (f_right - f_left)` so filters have equal area.

use ndarray::Array2;

const F_SP: f64 = 200.0 / 3.0;
const MIN_LOG_HZ: f64 = 1000.0;
const MIN_LOG_MEL: f64 = MIN_LOG_HZ / F_SP;

fn log_step() -> f64 {
    6.4f64.ln() / 27.0
}

pub fn hz_to_mel(hz: f64) -> f64 {
    if hz >= MIN_LOG_HZ {
        MIN_LOG_MEL + (hz / MIN_LOG_HZ).ln() / log_step()
    } else {
        hz / F_SP
    }
}

pub fn mel_to_hz(mel: f64) -> f64 {
    if mel >= MIN_LOG_MEL {
        MIN_LOG_HZ * (log_step() * (mel - MIN_LOG_MEL)).exp()
    } else {
        F_SP * mel
    }
}

/// Returns the `[n_mels, n_fft / 2 + 1]` filterbank matrix.
pub fn mel_filterbank(n_mels: usize, n_fft: usize, sample_rate: u32, f_min: f64, f_max: f64) -> Array2<f64> {
    let bins = n_fft / 2 + 1;
    let fft_freqs: Vec<f64> = (0..bins)
        .map(|k| k as f64 * sample_rate as f64 / n_fft as f64)
        .collect();

    let mel_lo = hz_to_mel(f_min);
    let mel_hi = hz_to_mel(f_max);
    let points = n_mels + 2;
    let mel_f: Vec<f64> = (0..points)
        .map(|i| mel_to_hz(mel_lo + (mel_hi - mel_lo) * i as f64 / (points - 1) as f64))
        .collect();

    let mut weights = Array2::zeros((n_mels, bins));
    for m in 0..n_mels {
        let lower_width = mel_f[m + 1] - mel_f[m];
        let upper_width = mel_f[m + 2] - mel_f[m + 1];
        let enorm = 2.0 / (mel_f[m + 2] - mel_f[m]);
        for (k, &f) in fft_freqs.iter().enumerate() {
            let lower = (f - mel_f[m]) / lower_width;
            let upper = (mel_f[m + 2] - f) / upper_width;
            weights[[m, k]] = lower.min(upper).max(0.0) * enorm;
        }
    }
    weights
}
