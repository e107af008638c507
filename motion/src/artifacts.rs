//! Training-time statistics stored as CSV tables.

use std::collections::HashMap;
use std::path::Path;

use csv::ReaderBuilder;
use ndarray::{Array1, Array2};
use tracing::info;

use crate::error::MotionError;
use crate::features::FeatureSet;

/// Per-feature mean and standard deviation.
///
/// File layout: a header of feature names after an empty index cell, then
/// one row labelled `mean` and one labelled `std`.
#[derive(Debug, Clone, PartialEq)]
pub struct MeanStdTable {
    stats: HashMap<String, (f64, f64)>,
}

impl MeanStdTable {
    pub fn from_csv(bytes: &[u8]) -> Result<Self, MotionError> {
        const NAME: &str = "mean/std table";
        let rows = read_labelled_rows(bytes, NAME)?;

        let row = |label: &str| {
            rows.rows
                .iter()
                .find(|(l, _)| l == label)
                .map(|(_, v)| v)
                .ok_or_else(|| MotionError::artifact(NAME, format!("missing {label:?} row")))
        };
        let means = row("mean")?;
        let stds = row("std")?;

        let mut stats = HashMap::with_capacity(rows.columns.len());
        for ((name, &mean), &std) in rows.columns.iter().zip(means).zip(stds) {
            if std == 0.0 {
                return Err(MotionError::artifact(NAME, format!("zero std for {name}")));
            }
            stats.insert(name.clone(), (mean, std));
        }
        Ok(Self { stats })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MotionError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| MotionError::artifact(path.display().to_string(), e))?;
        let table = Self::from_csv(&bytes)?;
        info!(path = %path.display(), features = table.len(), "loaded motion mean/std table");
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<(f64, f64)> {
        self.stats.get(name).copied()
    }

    /// Standardizes every feature the table knows about.
    pub fn standardize(&self, features: &mut FeatureSet) {
        for (name, value) in features.values_mut() {
            if let Some(&(mean, std)) = self.stats.get(name) {
                *value = (*value - mean) / std;
            }
        }
    }
}

/// Principal component loadings, `components x inputs`.
///
/// File layout: a header of input names after an empty index cell, then
/// one labelled row per component.
#[derive(Debug, Clone, PartialEq)]
pub struct PcaLoadings {
    loadings: Array2<f64>,
}

impl PcaLoadings {
    pub fn new(loadings: Array2<f64>) -> Self {
        Self { loadings }
    }

    pub fn from_csv(bytes: &[u8]) -> Result<Self, MotionError> {
        const NAME: &str = "pca loadings";
        let table = read_labelled_rows(bytes, NAME)?;
        if table.rows.is_empty() {
            return Err(MotionError::artifact(NAME, "no components"));
        }
        let width = table.columns.len();
        let flat: Vec<f64> = table.rows.into_iter().flat_map(|(_, v)| v).collect();
        let loadings = Array2::from_shape_vec((flat.len() / width, width), flat)
            .map_err(|e| MotionError::artifact(NAME, e))?;
        Ok(Self { loadings })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MotionError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| MotionError::artifact(path.display().to_string(), e))?;
        let pca = Self::from_csv(&bytes)?;
        info!(
            path = %path.display(),
            components = pca.components(),
            inputs = pca.inputs(),
            "loaded motion pca loadings"
        );
        Ok(pca)
    }

    pub fn components(&self) -> usize {
        self.loadings.nrows()
    }

    pub fn inputs(&self) -> usize {
        self.loadings.ncols()
    }

    /// `loadings . x`, without centering.
    pub fn project(&self, x: &[f64]) -> Vec<f64> {
        self.loadings.dot(&Array1::from(x.to_vec())).to_vec()
    }
}

struct LabelledRows {
    columns: Vec<String>,
    rows: Vec<(String, Vec<f64>)>,
}

/// Reads a table whose first column is a row label.
fn read_labelled_rows(bytes: &[u8], name: &str) -> Result<LabelledRows, MotionError> {
    let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(bytes);
    let headers = reader.headers().map_err(|e| MotionError::artifact(name, e))?;
    let columns: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();
    if columns.is_empty() {
        return Err(MotionError::artifact(name, "no columns"));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| MotionError::artifact(name, e))?;
        let label = record.get(0).unwrap_or_default().to_string();
        let values = record
            .iter()
            .skip(1)
            .map(|cell| {
                cell.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| MotionError::artifact(name, format!("row {label:?}: bad value {cell:?}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push((label, values));
    }
    Ok(LabelledRows { columns, rows })
}
