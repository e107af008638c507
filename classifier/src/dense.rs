//! Fully connected network evaluated from exported layer weights.

use ndarray::{Array1, Array2};
use serde::Deserialize;

use crate::error::ClassifierError;
use crate::feature::FeatureVector;
use crate::logistic::sigmoid;
use crate::model::{Classifier, flat_len};

/// Per-layer activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Linear,
    Relu,
    Tanh,
    Sigmoid,
    Softmax,
}

impl Activation {
    fn apply(self, v: &mut Array1<f64>) {
        match self {
            Self::Linear => {}
            Self::Relu => v.mapv_inplace(|x| x.max(0.0)),
            Self::Tanh => v.mapv_inplace(f64::tanh),
            Self::Sigmoid => v.mapv_inplace(sigmoid),
            Self::Softmax => {
                let max = v.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                v.mapv_inplace(|x| (x - max).exp());
                let sum = v.sum();
                v.mapv_inplace(|x| x / sum);
            }
        }
    }
}

/// JSON layout of one layer. `weights` is `[inputs][outputs]`, the layout a
/// Keras `Dense` kernel is exported in.
#[derive(Debug, Clone, Deserialize)]
pub struct DenseLayerFile {
    pub weights: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
    pub activation: Activation,
}

/// JSON layout of a whole network.
#[derive(Debug, Clone, Deserialize)]
pub struct DenseNetworkFile {
    pub input_shape: Vec<usize>,
    pub layers: Vec<DenseLayerFile>,
}

/// One validated layer.
#[derive(Debug, Clone)]
pub struct DenseLayer {
    weights: Array2<f64>,
    bias: Array1<f64>,
    activation: Activation,
}

impl DenseLayer {
    fn forward(&self, x: &Array1<f64>) -> Array1<f64> {
        let mut y = x.dot(&self.weights) + &self.bias;
        self.activation.apply(&mut y);
        y
    }
}

/// Feed-forward network over the row-major flattening of the input tensor.
///
/// The output layer must have one unit (probability of stroke) or two units
/// (softmax over `[no stroke, stroke]`).
#[derive(Debug, Clone)]
pub struct DenseNetwork {
    input_shape: Vec<usize>,
    layers: Vec<DenseLayer>,
}

impl TryFrom<DenseNetworkFile> for DenseNetwork {
    type Error = ClassifierError;

    fn try_from(file: DenseNetworkFile) -> Result<Self, Self::Error> {
        let mut width = flat_len(&file.input_shape);
        if width == 0 {
            return Err(ClassifierError::InvalidModel("dense: empty input shape".into()));
        }
        if file.layers.is_empty() {
            return Err(ClassifierError::InvalidModel("dense: no layers".into()));
        }

        let mut layers = Vec::with_capacity(file.layers.len());
        for (i, l) in file.layers.into_iter().enumerate() {
            if l.weights.len() != width {
                return Err(ClassifierError::InvalidModel(format!(
                    "dense: layer {i} expects {} inputs, previous width is {width}",
                    l.weights.len()
                )));
            }
            let out = l.bias.len();
            if out == 0 || l.weights.iter().any(|row| row.len() != out) {
                return Err(ClassifierError::InvalidModel(format!(
                    "dense: layer {i} weight rows do not match bias length {out}"
                )));
            }
            let flat: Vec<f64> = l.weights.into_iter().flatten().collect();
            if flat.iter().chain(&l.bias).any(|v| !v.is_finite()) {
                return Err(ClassifierError::InvalidModel(format!(
                    "dense: layer {i} has non-finite parameters"
                )));
            }
            let weights = Array2::from_shape_vec((width, out), flat)
                .map_err(|e| ClassifierError::InvalidModel(format!("dense: layer {i}: {e}")))?;
            layers.push(DenseLayer {
                weights,
                bias: Array1::from(l.bias),
                activation: l.activation,
            });
            width = out;
        }

        if width != 1 && width != 2 {
            return Err(ClassifierError::InvalidModel(format!(
                "dense: output width must be 1 or 2, got {width}"
            )));
        }

        Ok(Self {
            input_shape: file.input_shape,
            layers,
        })
    }
}

impl Classifier for DenseNetwork {
    fn input_shape(&self) -> &[usize] {
        &self.input_shape
    }

    fn positive_probability(&self, features: &FeatureVector) -> Result<f64, ClassifierError> {
        let mut x = Array1::from(features.to_flat_vec());
        for layer in &self.layers {
            x = layer.forward(&x);
        }
        // Single unit: P(stroke). Two units: [P(no stroke), P(stroke)].
        Ok(x[x.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(weights: Vec<Vec<f64>>, bias: Vec<f64>, activation: Activation) -> DenseLayerFile {
        DenseLayerFile {
            weights,
            bias,
            activation,
        }
    }

    fn fv(values: Vec<f64>) -> FeatureVector {
        let names = (0..values.len()).map(|i| format!("f{i}")).collect();
        FeatureVector::named(names, values)
    }

    #[test]
    fn relu_then_sigmoid() {
        let net = DenseNetwork::try_from(DenseNetworkFile {
            input_shape: vec![2],
            layers: vec![
                layer(vec![vec![1.0, -1.0], vec![1.0, -1.0]], vec![0.0, 0.0], Activation::Relu),
                layer(vec![vec![1.0], vec![1.0]], vec![0.0], Activation::Sigmoid),
            ],
        })
        .unwrap();

        // hidden = relu([3, -3]) = [3, 0]; out = sigmoid(3)
        let p = net.positive_probability(&fv(vec![1.0, 2.0])).unwrap();
        assert!((p - sigmoid(3.0)).abs() < 1e-12);
    }

    #[test]
    fn softmax_output_takes_positive_unit() {
        let net = DenseNetwork::try_from(DenseNetworkFile {
            input_shape: vec![1],
            layers: vec![layer(vec![vec![-1.0, 1.0]], vec![0.0, 0.0], Activation::Softmax)],
        })
        .unwrap();

        let p = net.positive_probability(&fv(vec![2.0])).unwrap();
        // softmax([-2, 2])[1] = 1 / (1 + e^-4)
        assert!((p - 1.0 / (1.0 + (-4.0f64).exp())).abs() < 1e-12);
    }

    #[test]
    fn layer_width_chain_checked() {
        let err = DenseNetwork::try_from(DenseNetworkFile {
            input_shape: vec![3],
            layers: vec![layer(vec![vec![1.0], vec![1.0]], vec![0.0], Activation::Sigmoid)],
        })
        .unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidModel(_)));
    }

    #[test]
    fn output_width_checked() {
        let err = DenseNetwork::try_from(DenseNetworkFile {
            input_shape: vec![1],
            layers: vec![layer(vec![vec![1.0, 1.0, 1.0]], vec![0.0, 0.0, 0.0], Activation::Softmax)],
        })
        .unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidModel(_)));
    }

    #[test]
    fn ragged_weights_rejected() {
        let err = DenseNetwork::try_from(DenseNetworkFile {
            input_shape: vec![2],
            layers: vec![layer(vec![vec![1.0], vec![1.0, 2.0]], vec![0.0], Activation::Sigmoid)],
        })
        .unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidModel(_)));
    }
}
