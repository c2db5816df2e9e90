use ndarray::{Array1, Array2};

use crate::error::{PolyFitError, Result};
use crate::linalg;

/// Results of a weighted least-squares polynomial fit.
///
/// Contains the coefficients and everything the inference layer needs.
#[derive(Debug, Clone)]
pub struct FitResult {
    /// Fitted coefficients; index i is the coefficient of x^i.
    pub coefficients: Array1<f64>,

    /// Inverse of the Gram matrix Xᵗ W X, (k+1)×(k+1).
    ///
    /// Supplies the coefficient variances: Var(β̂) = SE² · (Xᵗ W X)⁻¹.
    /// When the intercept is pinned, entry [0, 0] is 1 by convention.
    pub gram_inverse: Array2<f64>,

    /// Polynomial degree k of the fitted model.
    pub degree: usize,

    /// `Some(c)` when the degree-0 coefficient was pinned to c.
    pub fixed_intercept: Option<f64>,
}

impl FitResult {
    /// Degrees of freedom available to the model: N when the intercept is
    /// pinned, N - 1 otherwise.
    pub fn nstar(&self, n: usize) -> usize {
        if self.fixed_intercept.is_some() {
            n
        } else {
            n - 1
        }
    }
}

/// Fit a polynomial of the given degree to (x, y) by weighted least squares.
///
/// This is the validating entry point: it checks every structural
/// precondition, then hands off to the internal solve, which assumes they
/// hold.
///
/// # Arguments
/// * `x` - Independent variable, N values (need not be sorted or unique)
/// * `y` - Response, N values
/// * `degree` - Polynomial degree k; the model has k+1 coefficients
/// * `intercept` - `Some(c)` pins the degree-0 coefficient to c
/// * `weights` - N×N diagonal weight matrix (see [`crate::weights`])
///
/// # Errors
/// * `EmptyInput` / `DimensionMismatch` for structurally unusable inputs
/// * `InvalidInput` when `degree` exceeds the available degrees of freedom
///   or the weight matrix is singular (a point with zero weight)
/// * `SingularSystem` when the Gram matrix cannot be inverted
pub fn fit(
    x: &Array1<f64>,
    y: &Array1<f64>,
    degree: usize,
    intercept: Option<f64>,
    weights: &Array2<f64>,
) -> Result<FitResult> {
    let n = x.len();
    if n == 0 {
        return Err(PolyFitError::EmptyInput("no observations to fit".to_string()));
    }
    if y.len() != n {
        return Err(PolyFitError::DimensionMismatch(format!(
            "x has {} elements but y has {}",
            n,
            y.len()
        )));
    }
    if weights.nrows() != n || weights.ncols() != n {
        return Err(PolyFitError::DimensionMismatch(format!(
            "weight matrix is {} x {} but there are {} observations",
            weights.nrows(),
            weights.ncols(),
            n
        )));
    }

    let nstar = if intercept.is_some() { n } else { n - 1 };
    if degree > nstar {
        return Err(PolyFitError::InvalidInput(format!(
            "polynomial degree {} exceeds the {} available degrees of freedom \
             ({} points, intercept {})",
            degree,
            nstar,
            n,
            if intercept.is_some() { "fixed" } else { "estimated" }
        )));
    }

    if linalg::determinant(weights) == 0.0 {
        return Err(PolyFitError::InvalidInput(
            "weight matrix is singular: one or more points have zero weight; \
             review the per-point errors or use no weighting"
                .to_string(),
        ));
    }

    solve(x, y, degree, intercept, weights)
}

/// The actual normal-equations solve. Preconditions are assumed to hold.
fn solve(
    x: &Array1<f64>,
    y: &Array1<f64>,
    degree: usize,
    intercept: Option<f64>,
    weights: &Array2<f64>,
) -> Result<FitResult> {
    let n = x.len();
    let p = degree + 1;

    // Design matrix: entry (i, j) is x_i^j. With a pinned intercept the
    // degree-0 column is left at zero so the pinned direction drops out of
    // the Gram matrix entirely.
    let begin = if intercept.is_some() { 1 } else { 0 };
    let mut design = Array2::zeros((n, p));
    for i in 0..n {
        for j in begin..p {
            design[[i, j]] = x[i].powi(j as i32);
        }
    }

    let xtw = design.t().dot(weights); // (p, n)
    let mut gram = xtw.dot(&design); // (p, p)

    // Pin the intercept's diagonal entry so the otherwise-empty row/column
    // does not make the Gram matrix singular. Its "variance" entry in the
    // inverse carries no meaning and the inference layer zeroes it out.
    if intercept.is_some() {
        gram[[0, 0]] = 1.0;
    }

    log::debug!("design matrix X ({} x {}):\n{:.6}", n, p, design);
    log::debug!("Gram matrix XtWX:\n{:.6}", gram);

    let gram_inverse = linalg::invert(&gram)?;
    log::debug!("Gram inverse:\n{:.6}", gram_inverse);

    // With a pinned intercept the constant is moved to the response side.
    let adjusted_response = match intercept {
        Some(c) => y.mapv(|yi| yi - c),
        None => y.clone(),
    };

    let xtwy = xtw.dot(&adjusted_response); // (p,)
    let mut coefficients = gram_inverse.dot(&xtwy);

    if let Some(c) = intercept {
        coefficients[0] = c;
    }

    Ok(FitResult {
        coefficients,
        gram_inverse,
        degree,
        fixed_intercept: intercept,
    })
}

// =============================================================================
// Tests
// =============================================================================
