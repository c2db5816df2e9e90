// =============================================================================
// Goodness of Fit
// =============================================================================
//
// Weighted sums of squares and the measures derived from them. Everything
// here is a pure function of the data, the fitted coefficients, and the
// weight matrix; nothing touches the Gram inverse (that is the inference
// layer's territory).
//
// DEGREES OF FREEDOM
// ------------------
// nstar is N when the intercept is pinned and N - 1 otherwise. The error
// degrees of freedom are nstar - k. An exact fit (nstar == k) has no error
// degrees of freedom: the standard error is reported as 0 and the adjusted
// R² is undefined (NaN).
//
// =============================================================================

use ndarray::{Array1, Array2};

use crate::poly;

/// Weighted residual sum of squares: Σ W_ii (y_i - ŷ_i)².
pub fn residual_sum_of_squares(
    x: &Array1<f64>,
    y: &Array1<f64>,
    coefficients: &Array1<f64>,
    weights: &Array2<f64>,
) -> f64 {
    x.iter()
        .zip(y.iter())
        .enumerate()
        .map(|(i, (&xi, &yi))| {
            let residual = yi - poly::polynomial_value(coefficients, xi);
            residual * residual * weights[[i, i]]
        })
        .sum()
}

/// Weighted total sum of squares.
///
/// With a pinned intercept the raw second moment Σ W_ii y_i² is used; with
/// an estimated intercept the responses are centered on their weighted mean
/// first.
pub fn total_sum_of_squares(y: &Array1<f64>, weights: &Array2<f64>, fixed_intercept: bool) -> f64 {
    if fixed_intercept {
        y.iter()
            .enumerate()
            .map(|(i, &yi)| yi * yi * weights[[i, i]])
            .sum()
    } else {
        let mut sum_wy = 0.0;
        let mut sum_w = 0.0;
        for (i, &yi) in y.iter().enumerate() {
            sum_wy += yi * weights[[i, i]];
            sum_w += weights[[i, i]];
        }
        let weighted_mean = sum_wy / sum_w;

        y.iter()
            .enumerate()
            .map(|(i, &yi)| {
                let centered = yi - weighted_mean;
                centered * centered * weights[[i, i]]
            })
            .sum()
    }
}

/// Coefficient of determination R² = 1 - RSS/TSS.
///
/// Not finite when TSS is zero; callers must treat that as an invalid
/// result, not a number.
pub fn r_squared(rss: f64, tss: f64) -> f64 {
    1.0 - rss / tss
}

/// Adjusted R²: 1 - (nstar / (nstar - k)) · RSS/TSS.
///
/// `nstar` and `nstar - k` are the total and error degrees of freedom.
/// Returns NaN for an exact fit (nstar == k), where the ratio is undefined.
pub fn r_squared_adjusted(rss: f64, tss: f64, nstar: usize, degree: usize) -> f64 {
    if nstar <= degree {
        return f64::NAN;
    }
    1.0 - (nstar as f64 / (nstar - degree) as f64) * rss / tss
}

/// Standard error of the fit: sqrt(RSS / (nstar - k)).
///
/// Zero for an exact fit (nstar == k), where the quotient is undefined.
pub fn fit_standard_error(rss: f64, nstar: usize, degree: usize) -> f64 {
    if nstar > degree {
        (rss / (nstar - degree) as f64).sqrt()
    } else {
        0.0
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn identity(n: usize) -> Array2<f64> {
        Array2::eye(n)
    }

    #[test]
    fn test_rss_zero_for_exact_fit() {
        let x = array![0.0, 1.0, 2.0, 3.0];
        let y = array![1.0, 3.0, 5.0, 7.0];
        let coefficients = array![1.0, 2.0];
        let rss = residual_sum_of_squares(&x, &y, &coefficients, &identity(4));
        assert_abs_diff_eq!(rss, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rss_counts_weighted_residuals() {
        let x = array![0.0, 1.0];
        let y = array![1.0, 0.0];
        let coefficients = array![0.0]; // constant zero model
        let mut w = identity(2);
        w[[0, 0]] = 3.0;
        // residuals are 1 and 0, weighted: 3·1² + 1·0²
        let rss = residual_sum_of_squares(&x, &y, &coefficients, &w);
        assert_abs_diff_eq!(rss, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_tss_centered_when_intercept_estimated() {
        // mean of y is 4; squared deviations: 9 + 1 + 1 + 9
        let y = array![1.0, 3.0, 5.0, 7.0];
        let tss = total_sum_of_squares(&y, &identity(4), false);
        assert_abs_diff_eq!(tss, 20.0, epsilon = 1e-12);
    }

    #[test]
    fn test_tss_uncentered_when_intercept_pinned() {
        let y = array![1.0, 3.0, 5.0, 7.0];
        let tss = total_sum_of_squares(&y, &identity(4), true);
        assert_abs_diff_eq!(tss, 1.0 + 9.0 + 25.0 + 49.0, epsilon = 1e-12);
    }

    #[test]
    fn test_tss_uses_weighted_mean() {
        // Weight the first point heavily: weighted mean pulls toward y = 0.
        let y = array![0.0, 4.0];
        let mut w = identity(2);
        w[[0, 0]] = 3.0;
        // weighted mean = 4/4 = 1; TSS = 3·1 + 1·9
        let tss = total_sum_of_squares(&y, &w, false);
        assert_abs_diff_eq!(tss, 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_r_squared() {
        assert_abs_diff_eq!(r_squared(5.0, 20.0), 0.75, epsilon = 1e-12);
        assert_abs_diff_eq!(r_squared(0.0, 20.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_r_squared_adjusted() {
        // nstar = 9, k = 2: 1 - (9/7)·(5/20)
        let r2_adj = r_squared_adjusted(5.0, 20.0, 9, 2);
        assert_abs_diff_eq!(r2_adj, 1.0 - (9.0 / 7.0) * 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_r_squared_adjusted_undefined_for_exact_fit() {
        assert!(r_squared_adjusted(0.0, 20.0, 2, 2).is_nan());
    }

    #[test]
    fn test_fit_standard_error() {
        assert_abs_diff_eq!(fit_standard_error(8.0, 5, 1), 2.0_f64.sqrt(), epsilon = 1e-12);
        // Exact fit: left at zero instead of dividing by zero.
        assert_abs_diff_eq!(fit_standard_error(0.0, 2, 2), 0.0, epsilon = 1e-12);
    }
}
