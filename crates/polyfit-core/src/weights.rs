//! Observation weight matrix construction.
//!
//! The fit takes an N×N diagonal weight matrix. Each diagonal entry is
//! derived from a per-point error value according to the selected mode. A
//! zero on the diagonal marks a point the fit cannot use; the matrix is then
//! singular and the fit entry point rejects it before any solve.

use ndarray::{Array1, Array2};

use crate::error::{PolyFitError, Result};

/// How per-point error values translate into fit weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightMode {
    /// Ignore error values; every point gets weight 1.
    None,
    /// Use the raw error value as the weight.
    Sigma,
    /// Weight by inverse variance: 1/err², or 0 when err is not positive.
    InverseVariance,
}

/// Build the N×N diagonal weight matrix for `n` observations.
///
/// `error_values` is ignored for `WeightMode::None` (an empty array is fine);
/// for the other modes it must contain exactly `n` entries.
pub fn weight_matrix(
    error_values: &Array1<f64>,
    n: usize,
    mode: WeightMode,
) -> Result<Array2<f64>> {
    if mode != WeightMode::None && error_values.len() != n {
        return Err(PolyFitError::DimensionMismatch(format!(
            "{} error values provided for {} observations",
            error_values.len(),
            n
        )));
    }

    let mut weights = Array2::zeros((n, n));
    for i in 0..n {
        weights[[i, i]] = match mode {
            WeightMode::None => 1.0,
            WeightMode::Sigma => error_values[i],
            WeightMode::InverseVariance => {
                let e = error_values[i];
                if e > 0.0 {
                    1.0 / (e * e)
                } else {
                    0.0
                }
            }
        };
    }

    Ok(weights)
}
