use tracing::debug;

use crate::artifacts::{MeanStdTable, PcaLoadings};
use crate::error::MotionError;
use crate::features::{FeatureSet, extract_features};
use crate::series::{CENTER_WINDOW, GRID_STEP, MotionSeries, SensorAxis};

/// Statistics kept per axis before projection, in loading-matrix order.
/// `mcr` appears twice because the loadings were fitted on that layout.
pub const SELECTED_STATS: [&str; 9] = ["mcr", "std", "max", "min", "mcr", "peak", "rms", "grad", "grad_1000"];

/// Names of the 54 projected inputs.
pub fn selected_feature_names() -> Vec<String> {
    SensorAxis::ALL
        .iter()
        .flat_map(|axis| SELECTED_STATS.iter().map(move |stat| format!("{}_{stat}", axis.prefix())))
        .collect()
}

/// CSV bytes -> PCA components.
#[derive(Debug, Clone)]
pub struct MotionPipeline {
    mean_std: MeanStdTable,
    pca: PcaLoadings,
    selected: Vec<String>,
}

impl MotionPipeline {
    /// Checks that the table covers every selected feature and that the
    /// loadings have `components` rows over the selected inputs.
    pub fn new(mean_std: MeanStdTable, pca: PcaLoadings, components: usize) -> Result<Self, MotionError> {
        let selected = selected_feature_names();
        if let Some(missing) = selected.iter().find(|name| mean_std.get(name).is_none()) {
            return Err(MotionError::artifact("mean/std table", format!("no entry for {missing}")));
        }
        if pca.inputs() != selected.len() {
            return Err(MotionError::artifact(
                "pca loadings",
                format!("{} inputs, expected {}", pca.inputs(), selected.len()),
            ));
        }
        if pca.components() != components {
            return Err(MotionError::artifact(
                "pca loadings",
                format!("{} components, configured {components}", pca.components()),
            ));
        }
        Ok(Self {
            mean_std,
            pca,
            selected,
        })
    }

    pub fn components(&self) -> usize {
        self.pca.components()
    }

    /// `pca_var_1`, `pca_var_2`, ...
    pub fn component_names(&self) -> Vec<String> {
        (1..=self.components()).map(|i| format!("pca_var_{i}")).collect()
    }

    /// The 66 raw statistics of the centered window, before standardization.
    pub fn raw_features(&self, bytes: &[u8]) -> Result<FeatureSet, MotionError> {
        let mut series = MotionSeries::from_csv(bytes)?;
        series.subtract_baseline();
        let uniform = series.resample_uniform(GRID_STEP)?;
        let window = uniform.center_window(CENTER_WINDOW)?;
        debug!(rows = series.len(), uniform = uniform.len(), window = window.len(), "motion series prepared");
        Ok(extract_features(&window))
    }

    pub fn process(&self, bytes: &[u8]) -> Result<Vec<f64>, MotionError> {
        let mut features = self.raw_features(bytes)?;
        self.mean_std.standardize(&mut features);

        let mut selected = Vec::with_capacity(self.selected.len());
        for name in &self.selected {
            let value = features
                .get(name)
                .ok_or_else(|| MotionError::artifact("feature layout", format!("no feature {name}")))?;
            if !value.is_finite() {
                return Err(MotionError::NonFinite {
                    name: name.clone(),
                    value,
                });
            }
            selected.push(value);
        }

        let projected = self.pca.project(&selected);
        debug!(components = projected.len(), "motion features projected");
        Ok(projected)
    }
}
