//! Amplitude normalization.

use crate::error::AudioError;

/// Root mean square of `samples`, accumulated in f64.
pub fn rms(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum / samples.len() as f64).sqrt()
}

/// Scales `samples` so their RMS equals `target_db` dBFS.
pub fn rms_normalize(samples: &mut [f32], target_db: f64) -> Result<(), AudioError> {
    let current = rms(samples);
    if current == 0.0 {
        return Err(AudioError::Silent);
    }
    let gain = 10f64.powf(target_db / 20.0) / current;
    for s in samples.iter_mut() {
        *s = (*s as f64 * gain) as f32;
    }
    Ok(())
}

/// Scales `samples` so the largest magnitude is 1.
pub fn peak_normalize(samples: &mut [f32]) -> Result<(), AudioError> {
    let peak = samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
    if peak == 0.0 {
        return Err(AudioError::Silent);
    }
    for s in samples.iter_mut() {
        *s /= peak;
    }
    Ok(())
}
