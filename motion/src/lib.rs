//! Limb-motion feature pipeline.
//!
//! An inertial recording (CSV with `SamplingTime`, `AccelerationX/Y/Z`,
//! `GyroX/Y/Z`) becomes a short vector of principal components:
//!
//! 1. [`MotionSeries::from_csv`]: parse, trim, drop incomplete rows
//! 2. [`MotionSeries::subtract_baseline`]: subtract the first row
//! 3. [`MotionSeries::resample_uniform`]: linear interpolation onto a 50 ms grid
//! 4. [`MotionSeries::center_window`]: keep 100 samples around the middle
//! 5. [`extract_features`]: 11 statistics x 6 axes
//! 6. [`MeanStdTable::standardize`]: stored training statistics
//! 7. [`selected_feature_names`]: 9 statistics x 6 axes
//! 8. [`PcaLoadings::project`]: stored loadings, no centering

mod artifacts;
mod error;
mod features;
mod pipeline;
mod series;
#[cfg(test)]
mod testutil;

pub use artifacts::{MeanStdTable, PcaLoadings};
pub use error::MotionError;
pub use features::{FeatureSet, STAT_NAMES, axis_stats, extract_features};
pub use pipeline::{MotionPipeline, SELECTED_STATS, selected_feature_names};
pub use series::{CENTER_WINDOW, GRID_STEP, MAX_DURATION_SECS, MotionSeries, SensorAxis, TIME_COLUMN};
