//! Pointwise confidence and prediction bands.
//!
//! The bands are evaluated on a fixed grid of 101 evenly spaced points
//! spanning [min(x), max(x)]. At each grid point x* the leverage term
//! `xprod = x*' (X' W X)⁻¹ x*` scales the fit's standard error into the
//! variance of the predicted mean; adding 1 inside the square root widens it
//! into the variance of a new observation (the prediction band).

use ndarray::{Array1, Array2};

use crate::error::{PolyFitError, Result};
use crate::poly;

/// Number of grid points the bands are evaluated at.
pub const BAND_POINTS: usize = 101;

/// One evaluated grid point of the confidence/prediction bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandPoint {
    /// Grid location x*.
    pub x: f64,
    /// Predicted value ŷ(x*).
    pub y: f64,
    /// Confidence band: ŷ ± t·SE·sqrt(xprod).
    pub ci_low: f64,
    pub ci_high: f64,
    /// Prediction band: ŷ ± t·SE·sqrt(1 + xprod).
    pub pred_low: f64,
    pub pred_high: f64,
}

/// Evaluate the confidence and prediction bands over the data range.
///
/// Returns exactly [`BAND_POINTS`] points, ordered by increasing x, spanning
/// [min(x), max(x)] inclusive.
pub fn confidence_bands(
    x: &Array1<f64>,
    coefficients: &Array1<f64>,
    gram_inverse: &Array2<f64>,
    t_critical: f64,
    standard_error: f64,
) -> Result<Vec<BandPoint>> {
    if x.is_empty() {
        return Err(PolyFitError::EmptyInput(
            "cannot evaluate bands without observations".to_string(),
        ));
    }
    let p = coefficients.len();
    if gram_inverse.nrows() != p || gram_inverse.ncols() != p {
        return Err(PolyFitError::DimensionMismatch(format!(
            "Gram inverse is {} x {} but there are {} coefficients",
            gram_inverse.nrows(),
            gram_inverse.ncols(),
            p
        )));
    }

    let x_min = x.fold(f64::INFINITY, |a, &b| a.min(b));
    let x_max = x.fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    let step = (x_max - x_min) / (BAND_POINTS - 1) as f64;

    let mut points = Vec::with_capacity(BAND_POINTS);
    for i in 0..BAND_POINTS {
        let xs = x_min + step * i as f64;

        // Power vector (1, x*, x*², ...) and its leverage through G⁻¹.
        let xstar: Array1<f64> = (0..p).map(|j| xs.powi(j as i32)).collect();
        let xprod = xstar.dot(&gram_inverse.dot(&xstar));

        let y = poly::polynomial_value(coefficients, xs);
        let ci_half = t_critical * standard_error * xprod.sqrt();
        let pred_half = t_critical * standard_error * (1.0 + xprod).sqrt();

        points.push(BandPoint {
            x: xs,
            y,
            ci_low: y - ci_half,
            ci_high: y + ci_half,
            pred_low: y - pred_half,
            pred_high: y + pred_half,
        });
    }

    Ok(points)
}
