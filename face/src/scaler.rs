use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::FaceError;

/// Row normalization applied after scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Normalizer {
    L1,
    L2,
    Max,
}

impl Normalizer {
    /// Divides by the row norm; an all-zero row is left unchanged.
    pub fn apply(self, row: &mut [f64]) {
        let norm = match self {
            Self::L1 => row.iter().map(|v| v.abs()).sum::<f64>(),
            Self::L2 => row.iter().map(|v| v * v).sum::<f64>().sqrt(),
            Self::Max => row.iter().fold(0.0, |m: f64, v| m.max(v.abs())),
        };
        if norm != 0.0 {
            row.iter_mut().for_each(|v| *v /= norm);
        }
    }
}

/// Standard scaler `(x - mean) / scale` with an optional normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalizer: Option<Normalizer>,
}

impl FaceScaler {
    pub fn from_json(data: &str) -> Result<Self, FaceError> {
        let scaler: Self = serde_json::from_str(data).map_err(|e| FaceError::artifact("face scaler", e))?;
        scaler.validate()?;
        Ok(scaler)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FaceError> {
        let path = path.as_ref();
        let data =
            std::fs::read_to_string(path).map_err(|e| FaceError::artifact(path.display().to_string(), e))?;
        let scaler = Self::from_json(&data)?;
        info!(path = %path.display(), len = scaler.len(), normalizer = ?scaler.normalizer, "loaded face scaler");
        Ok(scaler)
    }

    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    fn validate(&self) -> Result<(), FaceError> {
        if self.mean.len() != self.scale.len() {
            return Err(FaceError::artifact(
                "face scaler",
                format!("{} means but {} scales", self.mean.len(), self.scale.len()),
            ));
        }
        if self.mean.iter().chain(&self.scale).any(|v| !v.is_finite()) {
            return Err(FaceError::artifact("face scaler", "non-finite value"));
        }
        if self.scale.contains(&0.0) {
            return Err(FaceError::artifact("face scaler", "zero scale"));
        }
        Ok(())
    }

    /// Scales `row` in place; `row.len()` must equal [`len`](Self::len).
    pub fn transform(&self, row: &mut [f64]) {
        for ((v, mean), scale) in row.iter_mut().zip(&self.mean).zip(&self.scale) {
            *v = (*v - mean) / scale;
        }
        if let Some(n) = self.normalizer {
            n.apply(row);
        }
    }
}
