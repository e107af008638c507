//! Pretrained binary classifiers behind a uniform inference contract.
//!
//! Every screening modality ends in the same step: a fixed-shape feature
//! tensor goes into a pretrained model and comes back as the probability of
//! the positive (stroke) class. This crate owns that step.
//!
//! # Architecture
//!
//! 1. [`Classifier`]: the seam. Anything that can turn a [`FeatureVector`]
//!    into a positive-class probability.
//! 2. [`LogisticModel`] / [`DenseNetwork`]: JSON-exported models evaluated
//!    in pure Rust, selected by the `kind` tag of the model file.
//! 3. [`ClassifierAdapter`]: wraps one loaded model and enforces the contract
//!    (shape check, finite inputs, score in `[0, 1]`, `label = score > 0.5`).
//!
//! # Model Files
//!
//! ```text
//! {"kind": "logistic", "input_shape": [11], "weights": [...], "intercept": 0.3}
//! {"kind": "dense", "input_shape": [1, 13, 626], "layers": [...]}
//! ```

mod adapter;
mod dense;
mod error;
mod feature;
mod logistic;
mod model;

pub use adapter::{ClassifierAdapter, Prediction};
pub use dense::{Activation, DenseLayer, DenseLayerFile, DenseNetwork, DenseNetworkFile};
pub use error::ClassifierError;
pub use feature::FeatureVector;
pub use logistic::LogisticModel;
pub use model::{Classifier, ModelSpec};
