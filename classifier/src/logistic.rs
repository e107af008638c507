use serde::Deserialize;

use crate::error::ClassifierError;
use crate::feature::FeatureVector;
use crate::model::{Classifier, flat_len};

/// Linear model with a logistic link, as exported from a fitted
/// `LogisticRegression` (`coef_[0]`, `intercept_[0]`).
#[derive(Debug, Clone, Deserialize)]
pub struct LogisticModel {
    pub input_shape: Vec<usize>,
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl LogisticModel {
    pub fn new(input_shape: Vec<usize>, weights: Vec<f64>, intercept: f64) -> Result<Self, ClassifierError> {
        let m = Self {
            input_shape,
            weights,
            intercept,
        };
        m.validate()?;
        Ok(m)
    }

    pub(crate) fn validate(&self) -> Result<(), ClassifierError> {
        let want = flat_len(&self.input_shape);
        if want == 0 {
            return Err(ClassifierError::InvalidModel("logistic: empty input shape".into()));
        }
        if self.weights.len() != want {
            return Err(ClassifierError::InvalidModel(format!(
                "logistic: {} weights for input of {want} values",
                self.weights.len()
            )));
        }
        if self.weights.iter().any(|w| !w.is_finite()) || !self.intercept.is_finite() {
            return Err(ClassifierError::InvalidModel("logistic: non-finite parameter".into()));
        }
        Ok(())
    }
}

impl Classifier for LogisticModel {
    fn input_shape(&self) -> &[usize] {
        &self.input_shape
    }

    fn positive_probability(&self, features: &FeatureVector) -> Result<f64, ClassifierError> {
        let z: f64 = features
            .as_array()
            .iter()
            .zip(&self.weights)
            .map(|(x, w)| x * w)
            .sum::<f64>()
            + self.intercept;
        Ok(sigmoid(z))
    }
}

/// Logistic function, evaluated without overflow for large |z|.
pub(crate) fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
