use std::fmt;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::ClassifierError;
use crate::feature::FeatureVector;
use crate::model::{Classifier, ModelSpec};

/// Decision threshold on the positive-class probability.
const THRESHOLD: f64 = 0.5;

/// Outcome of one screening inference.
///
/// Serializes as `{"stroke": 0|1, "score": f64}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    /// 1 when `score > 0.5`, else 0.
    pub stroke: u8,
    /// Probability of the positive class, in `[0, 1]`.
    pub score: f64,
}

impl Prediction {
    /// Derives the label from a probability already checked to lie in `[0, 1]`.
    pub fn from_probability(score: f64) -> Self {
        Self {
            stroke: u8::from(score > THRESHOLD),
            score,
        }
    }

    pub fn is_positive(&self) -> bool {
        self.stroke == 1
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stroke={} score={:.4}", self.stroke, self.score)
    }
}

/// Wraps one loaded [`Classifier`] and enforces the inference contract.
///
/// # Thread Safety
///
/// The adapter is immutable after construction and may be shared behind an
/// `Arc` across any number of concurrent requests.
pub struct ClassifierAdapter {
    model: Box<dyn Classifier>,
}

impl ClassifierAdapter {
    pub fn new(model: impl Classifier + 'static) -> Self {
        Self {
            model: Box::new(model),
        }
    }

    pub fn from_boxed(model: Box<dyn Classifier>) -> Self {
        Self { model }
    }

    /// Loads a JSON model file. Called once at startup.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let model = ModelSpec::from_path(path)?.build()?;
        info!(path = %path.display(), input_shape = ?model.input_shape(), "classifier loaded");
        Ok(Self { model })
    }

    pub fn input_shape(&self) -> &[usize] {
        self.model.input_shape()
    }

    /// Runs inference and returns the label and score.
    ///
    /// Rejects features whose shape differs from the model's input shape or
    /// that contain NaN/infinity, and rejects probabilities outside `[0, 1]`.
    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction, ClassifierError> {
        if features.shape() != self.model.input_shape() {
            return Err(ClassifierError::ShapeMismatch {
                expected: self.model.input_shape().to_vec(),
                got: features.shape().to_vec(),
            });
        }
        if let Some((index, value)) = features.first_non_finite() {
            return Err(ClassifierError::NonFinite { index, value });
        }

        let p = self.model.positive_probability(features)?;
        if !(0.0..=1.0).contains(&p) {
            return Err(ClassifierError::ProbabilityOutOfRange(p));
        }

        let prediction = Prediction::from_probability(p);
        debug!(%prediction, "classifier prediction");
        Ok(prediction)
    }
}

impl fmt::Debug for ClassifierAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierAdapter")
            .field("input_shape", &self.model.input_shape())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogisticModel;
    use std::io::Write;

    struct Fixed {
        shape: Vec<usize>,
        p: f64,
    }

    impl Classifier for Fixed {
        fn input_shape(&self) -> &[usize] {
            &self.shape
        }
        fn positive_probability(&self, _: &FeatureVector) -> Result<f64, ClassifierError> {
            Ok(self.p)
        }
    }

    fn fv(values: &[f64]) -> FeatureVector {
        let names = (0..values.len()).map(|i| format!("f{i}")).collect();
        FeatureVector::named(names, values.to_vec())
    }

    #[test]
    fn label_follows_strict_threshold() {
        assert_eq!(Prediction::from_probability(0.5).stroke, 0);
        assert_eq!(Prediction::from_probability(0.5000001).stroke, 1);
        assert_eq!(Prediction::from_probability(0.0).stroke, 0);
        assert_eq!(Prediction::from_probability(1.0).stroke, 1);
    }

    #[test]
    fn prediction_serializes_as_stroke_and_score() {
        let json = serde_json::to_value(Prediction::from_probability(0.75)).unwrap();
        assert_eq!(json["stroke"], 1);
        assert_eq!(json["score"], 0.75);
    }

    #[test]
    fn shape_mismatch_rejected() {
        let adapter = ClassifierAdapter::new(Fixed { shape: vec![3], p: 0.9 });
        let err = adapter.predict(&fv(&[1.0, 2.0])).unwrap_err();
        assert!(matches!(err, ClassifierError::ShapeMismatch { .. }));
    }

    #[test]
    fn non_finite_feature_rejected() {
        let adapter = ClassifierAdapter::new(Fixed { shape: vec![2], p: 0.9 });
        let err = adapter.predict(&fv(&[1.0, f64::NAN])).unwrap_err();
        assert!(matches!(err, ClassifierError::NonFinite { index: 1, .. }));
    }

    #[test]
    fn out_of_range_probability_rejected() {
        for p in [1.5, -0.1, f64::NAN] {
            let adapter = ClassifierAdapter::new(Fixed { shape: vec![1], p });
            let err = adapter.predict(&fv(&[0.0])).unwrap_err();
            assert!(matches!(err, ClassifierError::ProbabilityOutOfRange(_)));
        }
    }

    #[test]
    fn prediction_is_deterministic() {
        let model = LogisticModel::new(vec![3], vec![0.3, -0.2, 1.1], -0.05).unwrap();
        let adapter = ClassifierAdapter::new(model);
        let x = fv(&[0.4, 1.7, -0.3]);
        let a = adapter.predict(&x).unwrap();
        let b = adapter.predict(&x).unwrap();
        assert_eq!(a.score.to_bits(), b.score.to_bits());
        assert_eq!(a.stroke, b.stroke);
        assert_eq!(a.is_positive(), a.score > 0.5);
    }

    #[test]
    fn load_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(
            f,
            r#"{{"kind": "logistic", "input_shape": [2], "weights": [4.0, 0.0], "intercept": 0.0}}"#
        )
        .unwrap();
        let adapter = ClassifierAdapter::load(f.path()).unwrap();
        assert_eq!(adapter.input_shape(), &[2]);
        assert!(adapter.predict(&fv(&[1.0, 0.0])).unwrap().is_positive());
        assert!(!adapter.predict(&fv(&[-1.0, 0.0])).unwrap().is_positive());
    }
}
