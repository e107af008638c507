//! Per-axis summary statistics.
//!
//! Eleven statistics per axis, rounded to five decimals:
//!
//! | name | definition |
//! |---|---|
//! | `mean` | arithmetic mean |
//! | `std` | population standard deviation |
//! | `max`, `min` | extremes |
//! | `mcr` | largest absolute change between neighbours |
//! | `peak` | count of strict local maxima |
//! | `rms` | root mean square |
//! | `grad` | least-squares slope over `x = 1..=n`, times 20 |
//! | `grad_200`, `grad_400`, `grad_1000` | largest average rate of change over 4, 8 and 20 samples |

use crate::series::{MotionSeries, SensorAxis};

/// Statistic names in extraction order.
pub const STAT_NAMES: [&str; 11] = [
    "mean", "std", "max", "min", "mcr", "peak", "rms", "grad", "grad_200", "grad_400", "grad_1000",
];

/// Named feature values in a fixed order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    names: Vec<String>,
    values: Vec<f64>,
}

impl FeatureSet {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.names.iter().position(|n| n == name).map(|i| self.values[i])
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = (&str, &mut f64)> {
        self.names.iter().map(String::as_str).zip(self.values.iter_mut())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.names.iter().map(String::as_str).zip(self.values.iter().copied())
    }
}

/// `{prefix}_{stat}` for every axis and statistic: 66 features.
pub fn extract_features(series: &MotionSeries) -> FeatureSet {
    let mut names = Vec::with_capacity(66);
    let mut values = Vec::with_capacity(66);
    for axis in SensorAxis::ALL {
        let stats = axis_stats(series.axis(axis));
        for (stat, value) in STAT_NAMES.iter().zip(stats) {
            names.push(format!("{}_{stat}", axis.prefix()));
            values.push(value);
        }
    }
    FeatureSet { names, values }
}

/// The eleven statistics of one axis, in [`STAT_NAMES`] order.
pub fn axis_stats(data: &[f64]) -> [f64; 11] {
    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    let std = (data.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
    let max = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let min = data.iter().cloned().fold(f64::INFINITY, f64::min);
    let mcr = max_rate(data, 1);
    let peak = data
        .windows(3)
        .filter(|w| w[1] > w[0] && w[1] > w[2])
        .count() as f64;
    let rms = (data.iter().map(|v| v * v).sum::<f64>() / n).sqrt();
    let grad = slope(data) * 20.0;

    [
        mean,
        std,
        max,
        min,
        mcr,
        peak,
        rms,
        grad,
        max_rate(data, 4),
        max_rate(data, 8),
        max_rate(data, 20),
    ]
    .map(round5)
}

/// Largest `|data[i + span] - data[i]| / span`.
fn max_rate(data: &[f64], span: usize) -> f64 {
    (0..data.len().saturating_sub(span))
        .map(|i| (data[i + span] - data[i]).abs() / span as f64)
        .fold(0.0, f64::max)
}

/// Least-squares slope of `data` against `1..=n`.
fn slope(data: &[f64]) -> f64 {
    let n = data.len() as f64;
    let x_mean = (n + 1.0) / 2.0;
    let y_mean = data.iter().sum::<f64>() / n;
    let (mut sxy, mut sxx) = (0.0, 0.0);
    for (i, &y) in data.iter().enumerate() {
        let dx = (i + 1) as f64 - x_mean;
        sxy += dx * (y - y_mean);
        sxx += dx * dx;
    }
    if sxx == 0.0 { 0.0 } else { sxy / sxx }
}

fn round5(v: f64) -> f64 {
    (v * 1e5).round_ties_even() / 1e5
}
