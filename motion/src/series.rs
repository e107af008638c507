//! Inertial time series: CSV parsing, baseline removal, uniform resampling
//! and the center window.

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::error::MotionError;

/// Column holding the sample timestamps, in seconds.
pub const TIME_COLUMN: &str = "SamplingTime";

/// Grid step of the uniform time base, in seconds.
pub const GRID_STEP: f64 = 0.05;

/// Samples kept around the middle of the uniform series.
pub const CENTER_WINDOW: usize = 100;

/// Longest recording accepted, in seconds of `SamplingTime`.
pub const MAX_DURATION_SECS: f64 = 3600.0;

/// The six sensor channels, in feature order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorAxis {
    AccX,
    AccY,
    AccZ,
    GyrX,
    GyrY,
    GyrZ,
}

impl SensorAxis {
    pub const ALL: [SensorAxis; 6] = [
        SensorAxis::AccX,
        SensorAxis::AccY,
        SensorAxis::AccZ,
        SensorAxis::GyrX,
        SensorAxis::GyrY,
        SensorAxis::GyrZ,
    ];

    /// Header of this channel in the recorded CSV.
    pub fn column(self) -> &'static str {
        match self {
            Self::AccX => "AccelerationX",
            Self::AccY => "AccelerationY",
            Self::AccZ => "AccelerationZ",
            Self::GyrX => "GyroX",
            Self::GyrY => "GyroY",
            Self::GyrZ => "GyroZ",
        }
    }

    /// Prefix used in feature names (`AccX_std`).
    pub fn prefix(self) -> &'static str {
        match self {
            Self::AccX => "AccX",
            Self::AccY => "AccY",
            Self::AccZ => "AccZ",
            Self::GyrX => "GyrX",
            Self::GyrY => "GyrY",
            Self::GyrZ => "GyrZ",
        }
    }
}

/// Time stamps plus one value column per [`SensorAxis`].
#[derive(Debug, Clone, PartialEq)]
pub struct MotionSeries {
    pub time: Vec<f64>,
    pub axes: [Vec<f64>; 6],
}

impl MotionSeries {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn axis(&self, axis: SensorAxis) -> &[f64] {
        &self.axes[axis as usize]
    }

    /// Parses a recording. Headers and cells are trimmed, extra columns are
    /// ignored and rows with an empty required cell are dropped.
    pub fn from_csv(bytes: &[u8]) -> Result<Self, MotionError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(bytes);

        let headers = reader.headers()?.clone();
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| MotionError::MissingColumn(name.to_string()))
        };
        let time_idx = find(TIME_COLUMN)?;
        let mut axis_idx = [0usize; 6];
        for axis in SensorAxis::ALL {
            axis_idx[axis as usize] = find(axis.column())?;
        }

        let mut series = MotionSeries {
            time: Vec::new(),
            axes: Default::default(),
        };
        let mut dropped = 0usize;

        for (i, record) in reader.records().enumerate() {
            let record = record?;
            // Data rows are numbered from 1, after the header.
            let row = i + 1;
            let cell = |idx: usize| record.get(idx).filter(|s| !s.is_empty());

            let (Some(t), Some(values)) = (
                cell(time_idx),
                axis_idx.iter().map(|&idx| cell(idx)).collect::<Option<Vec<_>>>(),
            ) else {
                dropped += 1;
                continue;
            };

            series.time.push(parse_cell(t, row, TIME_COLUMN)?);
            for (axis, raw) in SensorAxis::ALL.into_iter().zip(values) {
                series.axes[axis as usize].push(parse_cell(raw, row, axis.column())?);
            }
        }

        debug!(rows = series.len(), dropped, "parsed motion csv");
        Ok(series)
    }

    /// Subtracts the first sample from every column, time included.
    pub fn subtract_baseline(&mut self) {
        if self.is_empty() {
            return;
        }
        let t0 = self.time[0];
        self.time.iter_mut().for_each(|t| *t -= t0);
        for column in self.axes.iter_mut() {
            let v0 = column[0];
            column.iter_mut().for_each(|v| *v -= v0);
        }
    }

    /// Linearly interpolates every axis onto `0, step, 2*step, ...` up to
    /// (excluding) `max(time) + step`. Values outside the recorded time range
    /// are held at the nearest endpoint.
    ///
    /// Recordings longer than [`MAX_DURATION_SECS`] are rejected.
    pub fn resample_uniform(&self, step: f64) -> Result<Self, MotionError> {
        if !(step.is_finite() && step > 0.0) {
            return Err(MotionError::artifact("grid step", format!("{step} is not a positive duration")));
        }
        if let Some(row) = self.time.windows(2).position(|w| w[1] < w[0]) {
            return Err(MotionError::NonMonotonicTime { row: row + 2 });
        }
        if self.is_empty() {
            return Ok(self.clone());
        }

        let max_time = self.time.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        if !max_time.is_finite() || max_time > MAX_DURATION_SECS {
            return Err(MotionError::TooLong {
                secs: max_time,
                max: MAX_DURATION_SECS,
            });
        }
        let count = ((max_time + step) / step).ceil().max(0.0) as usize;
        let grid: Vec<f64> = (0..count).map(|i| i as f64 * step).collect();

        let mut axes: [Vec<f64>; 6] = Default::default();
        for (out, column) in axes.iter_mut().zip(&self.axes) {
            *out = grid.iter().map(|&x| interp(x, &self.time, column)).collect();
        }
        Ok(Self { time: grid, axes })
    }

    /// Keeps `window` samples centered on `len / 2`.
    pub fn center_window(&self, window: usize) -> Result<Self, MotionError> {
        let n = self.len();
        if n < window {
            return Err(MotionError::TooShort { samples: n, window });
        }
        let mid = n / 2;
        let start = mid.saturating_sub(window / 2);
        let end = (mid + window / 2).min(n);
        let mut axes: [Vec<f64>; 6] = Default::default();
        for (out, column) in axes.iter_mut().zip(&self.axes) {
            *out = column[start..end].to_vec();
        }
        Ok(Self {
            time: self.time[start..end].to_vec(),
            axes,
        })
    }
}

fn parse_cell(raw: &str, row: usize, column: &str) -> Result<f64, MotionError> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| MotionError::InvalidValue {
            row,
            column: column.to_string(),
            value: raw.to_string(),
        })
}

/// Piecewise-linear interpolation of `(xp, fp)` at `x`, clamped at both ends.
/// `xp` must be non-decreasing and non-empty.
fn interp(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    let last = xp.len() - 1;
    if x <= xp[0] {
        return fp[0];
    }
    if x >= xp[last] {
        return fp[last];
    }
    // Largest j with xp[j] <= x; j < last here.
    let j = xp.partition_point(|&t| t <= x) - 1;
    let (x0, x1) = (xp[j], xp[j + 1]);
    if x1 == x0 {
        return fp[j];
    }
    fp[j] + (fp[j + 1] - fp[j]) * (x - x0) / (x1 - x0)
}
