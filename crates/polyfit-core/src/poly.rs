//! Polynomial evaluation helpers shared by the solver, the goodness-of-fit
//! measures, and the confidence bands.

use ndarray::Array1;

/// Evaluate the polynomial with the given coefficients at `x`.
///
/// `coefficients[i]` is the coefficient of x^i.
pub fn polynomial_value(coefficients: &Array1<f64>, x: f64) -> f64 {
    coefficients
        .iter()
        .enumerate()
        .map(|(i, &c)| c * x.powi(i as i32))
        .sum()
}

/// Evaluate the first derivative of the polynomial at `x`.
pub fn polynomial_derivative(coefficients: &Array1<f64>, x: f64) -> f64 {
    coefficients
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, &c)| i as f64 * c * x.powi(i as i32 - 1))
        .sum()
}
