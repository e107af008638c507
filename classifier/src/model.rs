use std::path::Path;

use serde::Deserialize;

use crate::dense::{DenseNetwork, DenseNetworkFile};
use crate::error::ClassifierError;
use crate::feature::FeatureVector;
use crate::logistic::LogisticModel;

/// Produces the positive-class probability for a feature tensor.
///
/// Implementations are loaded once and shared across concurrent requests,
/// so inference must not mutate the model and must be deterministic.
pub trait Classifier: Send + Sync {
    /// Shape the model was trained on, e.g. `[11]` or `[1, 13, 626]`.
    fn input_shape(&self) -> &[usize];

    /// Returns P(stroke) for `features`.
    ///
    /// Callers guarantee `features.shape() == self.input_shape()` and that all
    /// values are finite; [`ClassifierAdapter`](crate::ClassifierAdapter)
    /// enforces both before calling.
    fn positive_probability(&self, features: &FeatureVector) -> Result<f64, ClassifierError>;
}

/// On-disk model description, tagged by `kind`.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    Logistic(LogisticModel),
    Dense(DenseNetworkFile),
}

impl ModelSpec {
    /// Parses a JSON model description.
    pub fn from_json(data: &[u8]) -> Result<Self, ClassifierError> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Reads and parses a JSON model file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let data = std::fs::read(path)?;
        Self::from_json(&data)
    }

    /// Validates the description and builds the evaluator.
    pub fn build(self) -> Result<Box<dyn Classifier>, ClassifierError> {
        match self {
            Self::Logistic(m) => {
                m.validate()?;
                Ok(Box::new(m))
            }
            Self::Dense(f) => Ok(Box::new(DenseNetwork::try_from(f)?)),
        }
    }
}

pub(crate) fn flat_len(shape: &[usize]) -> usize {
    shape.iter().product()
}
