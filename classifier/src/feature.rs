use ndarray::{Array1, ArrayD};

/// Ordered, fixed-shape numeric input for a classifier.
///
/// Tabular modalities (face ratios, motion PCA components) are 1-D and carry
/// one name per value. The speech modality is a `[1, coeffs, frames]` tensor
/// and carries no names.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    data: ArrayD<f64>,
    names: Vec<String>,
}

impl FeatureVector {
    /// Creates a 1-D vector with one name per value.
    ///
    /// Panics if `names` and `values` differ in length.
    pub fn named(names: Vec<String>, values: Vec<f64>) -> Self {
        assert_eq!(
            names.len(),
            values.len(),
            "classifier: feature names and values differ in length"
        );
        Self {
            data: Array1::from(values).into_dyn(),
            names,
        }
    }

    /// Wraps an unnamed tensor of any rank.
    pub fn from_array(data: ArrayD<f64>) -> Self {
        Self {
            data,
            names: Vec::new(),
        }
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Total number of scalar values.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Feature names; empty for unnamed tensors.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn as_array(&self) -> &ArrayD<f64> {
        &self.data
    }

    /// Values in row-major (logical) order.
    pub fn to_flat_vec(&self) -> Vec<f64> {
        self.data.iter().copied().collect()
    }

    /// Returns the row-major index and value of the first NaN or infinity.
    pub fn first_non_finite(&self) -> Option<(usize, f64)> {
        self.data
            .iter()
            .copied()
            .enumerate()
            .find(|(_, v)| !v.is_finite())
    }
}
