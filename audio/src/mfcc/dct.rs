//! Orthonormal DCT-II as a matrix.

use std::f64::consts::PI;

use ndarray::Array2;

/// Returns the first `n_out` rows of the orthonormal `n_in`-point DCT-II.
///
/// `D[k][n] = s_k * cos(pi * k * (2n + 1) / (2 * n_in))` with
/// `s_0 = sqrt(1 / n_in)` and `s_k = sqrt(2 / n_in)` otherwise.
pub fn dct_matrix(n_out: usize, n_in: usize) -> Array2<f64> {
    let n = n_in as f64;
    Array2::from_shape_fn((n_out, n_in), |(k, i)| {
        let scale = if k == 0 { (1.0 / n).sqrt() } else { (2.0 / n).sqrt() };
        scale * (PI * k as f64 * (2 * i + 1) as f64 / (2.0 * n)).cos()
    })
}
