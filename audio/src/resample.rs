//! Sample rate conversion using rubato.
//!
//! The whole recording is converted in one chunk with a 256-tap sinc filter.
//! The filter delay is removed and the output is cut to
//! `ceil(len * to / from)` samples, so the result is time-aligned with the
//! input.

use rubato::{Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction};
use tracing::debug;

use crate::error::AudioError;

/// Resamples mono `samples` from `from` Hz to `to` Hz.
pub fn resample(samples: &[f32], from: u32, to: u32) -> Result<Vec<f32>, AudioError> {
    let fail = |reason: String| AudioError::Resample { from, to, reason };

    if from == 0 || to == 0 {
        return Err(fail("sample rate must be positive".into()));
    }
    if from == to || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let ratio = to as f64 / from as f64;
    let expected = (samples.len() as f64 * ratio).ceil() as usize;

    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };
    let mut resampler = SincFixedIn::<f32>::new(ratio, 1.0, params, samples.len(), 1)
        .map_err(|e| fail(e.to_string()))?;
    let delay = resampler.output_delay();

    let mut out = resampler
        .process(&[samples], None)
        .map_err(|e| fail(e.to_string()))?
        .swap_remove(0);

    // Flush the filter tail with zeros until the delayed output is complete.
    while out.len() < delay + expected {
        let tail = resampler
            .process_partial(None::<&[Vec<f32>]>, None)
            .map_err(|e| fail(e.to_string()))?
            .swap_remove(0);
        if tail.is_empty() {
            break;
        }
        out.extend(tail);
    }

    let end = (delay + expected).min(out.len());
    let start = delay.min(end);
    let resampled = out[start..end].to_vec();

    debug!(from, to, input = samples.len(), output = resampled.len(), "resampled audio");
    Ok(resampled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::sine;

    #[test]
    fn same_rate_is_identity() {
        let x = sine(300.0, 0.1, 16_000);
        assert_eq!(resample(&x, 16_000, 16_000).unwrap(), x);
    }

    #[test]
    fn empty_input() {
        assert!(resample(&[], 44_100, 16_000).unwrap().is_empty());
    }

    #[test]
    fn zero_rate_rejected() {
        let err = resample(&[0.0; 10], 0, 16_000).unwrap_err();
        assert!(matches!(err, AudioError::Resample { from: 0, .. }));
    }

    #[test]
    fn downsample_length() {
        let x = sine(440.0, 1.0, 44_100);
        let y = resample(&x, 44_100, 16_000).unwrap();
        assert_eq!(y.len(), 16_000);
    }

    #[test]
    fn upsample_length() {
        let x = sine(440.0, 0.5, 8_000);
        let y = resample(&x, 8_000, 16_000).unwrap();
        assert_eq!(y.len(), 8_000);
    }

    #[test]
    fn preserves_tone_amplitude() {
        let x = sine(440.0, 1.0, 48_000);
        let y = resample(&x, 48_000, 16_000).unwrap();
        // Skip the edges where the filter sees zero padding.
        let mid = &y[2000..14_000];
        let peak = mid.iter().fold(0.0f32, |m, v| m.max(v.abs()));
        assert!((peak - 0.5).abs() < 0.02, "peak {peak}");
    }
}
