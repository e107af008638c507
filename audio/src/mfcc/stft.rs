//! Centered short-time Fourier transform.

use std::f64::consts::PI;
use std::sync::Arc;

use ndarray::Array2;
use rustfft::num_complex::Complex64;
use rustfft::{Fft, FftPlanner};

/// Periodic Hann window (the DFT-even form used for spectral analysis).
pub fn hann_window(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f64 / n as f64).cos())
        .collect()
}

/// Number of frames a centered STFT produces for `len` samples.
pub fn frame_count(len: usize, hop: usize) -> usize {
    1 + len / hop
}

/// Planned forward FFT plus analysis window for a fixed frame size.
pub struct Stft {
    n_fft: usize,
    hop: usize,
    window: Vec<f64>,
    fft: Arc<dyn Fft<f64>>,
}

impl Stft {
    pub fn new(n_fft: usize, hop: usize) -> Self {
        let fft = FftPlanner::new().plan_fft_forward(n_fft);
        Self {
            n_fft,
            hop,
            window: hann_window(n_fft),
            fft,
        }
    }

    pub fn n_fft(&self) -> usize {
        self.n_fft
    }

    /// Number of non-negative frequency bins, `n_fft / 2 + 1`.
    pub fn bins(&self) -> usize {
        self.n_fft / 2 + 1
    }

    /// Returns `|X|^power` as `[bins, frames]`.
    ///
    /// The signal is zero-padded by `n_fft / 2` on both sides so that frame
    /// `t` is centered on sample `t * hop`.
    pub fn spectrogram(&self, samples: &[f32], power: i32) -> Array2<f64> {
        let pad = self.n_fft / 2;
        let frames = frame_count(samples.len(), self.hop);
        let bins = self.bins();

        let mut out = Array2::zeros((bins, frames));
        let mut buf = vec![Complex64::new(0.0, 0.0); self.n_fft];
        let mut scratch = vec![Complex64::new(0.0, 0.0); self.fft.get_inplace_scratch_len()];

        for t in 0..frames {
            // Frame t covers padded[t*hop .. t*hop + n_fft] = samples[t*hop - pad ..].
            let origin = (t * self.hop) as isize - pad as isize;
            for (i, slot) in buf.iter_mut().enumerate() {
                let idx = origin + i as isize;
                let s = if idx >= 0 && (idx as usize) < samples.len() {
                    samples[idx as usize] as f64
                } else {
                    0.0
                };
                *slot = Complex64::new(s * self.window[i], 0.0);
            }

            self.fft.process_with_scratch(&mut buf, &mut scratch);

            for k in 0..bins {
                let mag = buf[k].norm();
                out[[k, t]] = if power == 1 { mag } else { mag.powi(power) };
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hann_is_periodic() {
        let w = hann_window(8);
        assert_eq!(w.len(), 8);
        assert!(w[0].abs() < 1e-15);
        assert!((w[4] - 1.0).abs() < 1e-15);
        // Periodic form: w[i] == w[n - i]
        for i in 1..8 {
            assert!((w[i] - w[8 - i]).abs() < 1e-12);
        }
    }

    #[test]
    fn frame_count_centered() {
        assert_eq!(frame_count(320_000, 512), 626);
        assert_eq!(frame_count(0, 512), 1);
        assert_eq!(frame_count(511, 512), 1);
        assert_eq!(frame_count(512, 512), 2);
    }

    #[test]
    fn spectrogram_shape() {
        let stft = Stft::new(2048, 512);
        let s = stft.spectrogram(&vec![0.1; 16_000], 2);
        assert_eq!(s.shape(), &[1025, 32]);
    }

    #[test]
    fn tone_peaks_at_its_bin() {
        let sr = 16_000.0;
        let n_fft = 1024;
        // 1000 Hz lands exactly on bin 64.
        let x: Vec<f32> = (0..8000)
            .map(|i| (2.0 * PI * 1000.0 * i as f64 / sr).sin() as f32)
            .collect();
        let stft = Stft::new(n_fft, 256);
        let s = stft.spectrogram(&x, 1);
        let t = s.shape()[1] / 2;
        let (peak_bin, _) = s
            .column(t)
            .iter()
            .enumerate()
            .fold((0, 0.0), |(bi, bv), (i, &v)| if v > bv { (i, v) } else { (bi, bv) });
        assert_eq!(peak_bin, 64);
    }
}
