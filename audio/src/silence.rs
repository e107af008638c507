//! Energy-based silence detection.
//!
//! A frame is non-silent when its mean-square energy is within `top_db`
//! of the loudest frame. Frames are 2048 samples, hop 512, centered with
//! zero padding.

use std::ops::Range;

const FRAME: usize = 2048;
const HOP: usize = 512;
const AMIN: f64 = 1e-10;

/// Per-frame non-silence flags.
pub fn nonsilent_frames(samples: &[f32], top_db: f64) -> Vec<bool> {
    let mse = frame_mse(samples);
    let peak = mse.iter().cloned().fold(AMIN, f64::max);
    let ref_db = 10.0 * peak.log10();
    mse.iter()
        .map(|&e| 10.0 * e.max(AMIN).log10() - ref_db > -top_db)
        .collect()
}

fn frame_mse(samples: &[f32]) -> Vec<f64> {
    let pad = FRAME / 2;
    let frames = 1 + samples.len() / HOP;
    (0..frames)
        .map(|t| {
            let start = (t * HOP) as isize - pad as isize;
            let lo = start.max(0) as usize;
            let hi = ((start + FRAME as isize).max(0) as usize).min(samples.len());
            let sum: f64 = samples
                .get(lo..hi)
                .unwrap_or(&[])
                .iter()
                .map(|&s| (s as f64) * (s as f64))
                .sum();
            sum / FRAME as f64
        })
        .collect()
}

/// Sample ranges of the non-silent intervals, in order.
pub fn nonsilent_intervals(samples: &[f32], top_db: f64) -> Vec<Range<usize>> {
    let flags = nonsilent_frames(samples, top_db);
    let to_sample = |frame: usize| (frame * HOP).min(samples.len());

    let mut intervals = Vec::new();
    let mut open: Option<usize> = None;
    for (i, &on) in flags.iter().enumerate() {
        match (on, open) {
            (true, None) => open = Some(i),
            (false, Some(start)) => {
                intervals.push(to_sample(start)..to_sample(i));
                open = None;
            }
            _ => {}
        }
    }
    if let Some(start) = open {
        intervals.push(to_sample(start)..to_sample(flags.len()));
    }
    intervals
}

/// Concatenates the non-silent intervals.
pub fn split(samples: &[f32], top_db: f64) -> Vec<f32> {
    nonsilent_intervals(samples, top_db)
        .into_iter()
        .flat_map(|r| samples[r].iter().copied())
        .collect()
}

/// Drops leading and trailing silence only.
pub fn trim_edges(samples: &[f32], top_db: f64) -> Vec<f32> {
    let flags = nonsilent_frames(samples, top_db);
    let first = flags.iter().position(|&f| f);
    let last = flags.iter().rposition(|&f| f);
    match (first, last) {
        (Some(first), Some(last)) => {
            let start = (first * HOP).min(samples.len());
            let end = ((last + 1) * HOP).min(samples.len());
            samples[start..end].to_vec()
        }
        _ => Vec::new(),
    }
}
