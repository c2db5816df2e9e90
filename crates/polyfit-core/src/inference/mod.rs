// =============================================================================
// Statistical Inference
// =============================================================================
//
// Everything derived from a finished fit: standard errors on the
// coefficients, confidence intervals, t-statistics and their tail
// probabilities, the ANOVA decomposition, and the coefficient
// covariance/correlation matrices. The confidence and prediction bands live
// in the `bands` submodule.
//
// All of it flows from three inputs the solver leaves behind:
//
//   - the coefficient vector β
//   - the Gram inverse (Xᵗ W X)⁻¹, which scales into Var(β̂) = SE² (Xᵗ W X)⁻¹
//   - the residual and total sums of squares
//
// P-VALUE CONVENTION
// ------------------
// The per-coefficient tail probability reported here is 1 - CDF(|t|), the
// upper tail, NOT doubled into a conventional two-sided p-value. This
// matches the established output convention of this engine; consumers who
// want the two-sided value can double it themselves.
//
// =============================================================================

pub mod bands;

use ndarray::{Array1, Array2};

use crate::diagnostics;
use crate::error::{PolyFitError, Result};
use crate::solvers::FitResult;
use crate::special;

// =============================================================================
// Coefficient-Level Inference
// =============================================================================

/// Standard errors of the fitted coefficients: SE · sqrt(G⁻¹[i][i]).
///
/// With a pinned intercept, index 0 is forced to 0: a pinned value carries
/// no uncertainty.
pub fn coefficient_standard_errors(
    standard_error: f64,
    gram_inverse: &Array2<f64>,
    fixed_intercept: bool,
) -> Array1<f64> {
    let p = gram_inverse.nrows();
    let begin = if fixed_intercept { 1 } else { 0 };

    let mut errors = Array1::zeros(p);
    for i in begin..p {
        errors[i] = standard_error * gram_inverse[[i, i]].sqrt();
    }
    errors
}

/// Critical t-value for a two-sided confidence level: |t_{1 - alpha/2}| at
/// `df` degrees of freedom.
pub fn t_critical(df: f64, alpha: f64) -> Result<f64> {
    if alpha <= 0.0 || alpha >= 1.0 {
        return Err(PolyFitError::InvalidInput(format!(
            "significance level alpha must be in (0, 1), got {}",
            alpha
        )));
    }
    Ok(special::student_t_quantile(df, 1.0 - 0.5 * alpha)?.abs())
}

/// Inference results for a single coefficient.
///
/// `t_statistic` and `p_value` are `None` when the standard error is zero
/// (a pinned intercept, or an exact fit): the ratio is undefined and must
/// not masquerade as a number.
#[derive(Debug, Clone)]
pub struct CoefficientInference {
    pub estimate: f64,
    pub std_error: f64,
    pub ci_low: f64,
    pub ci_high: f64,
    pub t_statistic: Option<f64>,
    /// Upper-tail probability 1 - CDF(|t|); see the module notes on the
    /// (un-doubled) convention.
    pub p_value: Option<f64>,
}

/// Build the per-coefficient inference table.
pub fn coefficient_table(
    coefficients: &Array1<f64>,
    std_errors: &Array1<f64>,
    df: f64,
    t_crit: f64,
) -> Result<Vec<CoefficientInference>> {
    let mut table = Vec::with_capacity(coefficients.len());

    for (&estimate, &std_error) in coefficients.iter().zip(std_errors.iter()) {
        let (t_statistic, p_value) = if std_error > 0.0 {
            let t = estimate / std_error;
            let p = 1.0 - special::student_cdf(df, t.abs())?;
            (Some(t), Some(p))
        } else {
            (None, None)
        };

        let margin = t_crit * std_error;
        table.push(CoefficientInference {
            estimate,
            std_error,
            ci_low: estimate - margin,
            ci_high: estimate + margin,
            t_statistic,
            p_value,
        });
    }

    Ok(table)
}

// =============================================================================
// ANOVA
// =============================================================================

/// The ANOVA decomposition of a fit.
#[derive(Debug, Clone)]
pub struct AnovaTable {
    pub df_model: f64,
    pub ss_model: f64,
    pub ms_model: f64,
    pub f_statistic: f64,
    /// P(F > f_statistic) from the Fisher-F distribution.
    pub p_value: f64,
    pub df_error: f64,
    pub ss_error: f64,
    pub ms_error: f64,
    pub df_total: f64,
    pub ss_total: f64,
}

/// ANOVA table from the sums of squares.
///
/// Requires at least one model degree of freedom (degree ≥ 1) and at least
/// one error degree of freedom (nstar > degree); anything else has no valid
/// F-statistic.
pub fn anova(tss: f64, rss: f64, degree: usize, nstar: usize) -> Result<AnovaTable> {
    if degree == 0 || nstar <= degree {
        return Err(PolyFitError::InvalidInput(format!(
            "ANOVA requires 1 <= degree < nstar, got degree = {}, nstar = {}",
            degree, nstar
        )));
    }

    let df_model = degree as f64;
    let df_error = (nstar - degree) as f64;
    let ss_model = tss - rss;
    let ms_model = ss_model / df_model;
    let ms_error = rss / df_error;
    let f_statistic = ms_model / ms_error;

    // A zero RSS (exact fit) makes F infinite; the tail probability is 0 by
    // construction, but report it as NaN-free only when F is finite.
    let p_value = if f_statistic.is_finite() {
        1.0 - special::fisher_cdf(df_model, df_error, f_statistic)?
    } else {
        0.0
    };

    Ok(AnovaTable {
        df_model,
        ss_model,
        ms_model,
        f_statistic,
        p_value,
        df_error,
        ss_error: rss,
        ms_error,
        df_total: nstar as f64,
        ss_total: tss,
    })
}

// =============================================================================
// Covariance and Correlation
// =============================================================================

/// Coefficient covariance matrix: SE² · G⁻¹.
///
/// With a pinned intercept, entry [0, 0] is forced to 1, matching the
/// solver's pinning convention for the Gram matrix.
pub fn covariance_matrix(
    standard_error: f64,
    gram_inverse: &Array2<f64>,
    fixed_intercept: bool,
) -> Array2<f64> {
    let mut cov = gram_inverse.mapv(|g| standard_error * standard_error * g);
    if fixed_intercept {
        cov[[0, 0]] = 1.0;
    }
    cov
}

/// Correlation matrix: covariance normalized by sqrt of the diagonal
/// products. Entries are NaN where a diagonal variance is zero; consumers
/// must treat those as undefined, not as numbers.
pub fn correlation_matrix(covariance: &Array2<f64>) -> Array2<f64> {
    let p = covariance.nrows();
    let mut corr = Array2::zeros((p, p));
    for i in 0..p {
        for j in 0..p {
            corr[[i, j]] =
                covariance[[i, j]] / (covariance[[i, i]].sqrt() * covariance[[j, j]].sqrt());
        }
    }
    corr
}

// =============================================================================
// Significance Stars (for summary tables)
// =============================================================================

/// Significance stars for a tail probability:
/// "***" below 0.001, "**" below 0.01, "*" below 0.05, "." below 0.1.
pub fn significance_stars(p_value: f64) -> &'static str {
    if p_value < 0.001 {
        "***"
    } else if p_value < 0.01 {
        "**"
    } else if p_value < 0.05 {
        "*"
    } else if p_value < 0.1 {
        "."
    } else {
        ""
    }
}

// =============================================================================
// The Full Report
// =============================================================================

/// Everything the inference layer derives from one fit.
#[derive(Debug, Clone)]
pub struct FitReport {
    /// Number of observations N.
    pub observations: usize,
    /// Total degrees of freedom: N with a pinned intercept, N - 1 otherwise.
    pub nstar: usize,
    /// Polynomial degree k.
    pub degree: usize,
    /// Significance level the intervals were computed at.
    pub alpha: f64,

    pub rss: f64,
    pub tss: f64,
    pub r_squared: f64,
    /// NaN for an exact fit (no error degrees of freedom).
    pub r_squared_adjusted: f64,
    /// Standard error of the fit; 0 for an exact fit.
    pub standard_error: f64,
    /// Critical t at 1 - alpha/2; 0 for an exact fit.
    pub t_critical: f64,

    pub coefficients: Vec<CoefficientInference>,
    /// `None` when no valid F-statistic exists (degree 0 or an exact fit).
    pub anova: Option<AnovaTable>,
    pub covariance: Array2<f64>,
    pub correlation: Array2<f64>,
}

/// Derive the full inferential report for a finished fit.
///
/// # Errors
/// * `InvalidInput` when alpha is outside (0, 1) or the total sum of squares
///   is zero (R² undefined; constant responses cannot be scored)
/// * `DimensionMismatch` when x, y, or the weight matrix disagree on N
pub fn summarize(
    x: &Array1<f64>,
    y: &Array1<f64>,
    fit: &FitResult,
    weights: &Array2<f64>,
    alpha: f64,
) -> Result<FitReport> {
    let n = x.len();
    if n == 0 {
        return Err(PolyFitError::EmptyInput(
            "cannot summarize a fit without observations".to_string(),
        ));
    }
    if y.len() != n || weights.nrows() != n || weights.ncols() != n {
        return Err(PolyFitError::DimensionMismatch(format!(
            "x has {} elements, y has {}, weight matrix is {} x {}",
            n,
            y.len(),
            weights.nrows(),
            weights.ncols()
        )));
    }
    if alpha <= 0.0 || alpha >= 1.0 {
        return Err(PolyFitError::InvalidInput(format!(
            "significance level alpha must be in (0, 1), got {}",
            alpha
        )));
    }

    let fixed = fit.fixed_intercept.is_some();
    let degree = fit.degree;
    let nstar = fit.nstar(n);
    if degree > nstar {
        return Err(PolyFitError::InvalidInput(format!(
            "fit of degree {} cannot be summarized against {} observations",
            degree, n
        )));
    }

    let rss = diagnostics::residual_sum_of_squares(x, y, &fit.coefficients, weights);
    let tss = diagnostics::total_sum_of_squares(y, weights, fixed);
    if tss == 0.0 {
        return Err(PolyFitError::InvalidInput(
            "total sum of squares is zero; R-squared and the F-test are undefined".to_string(),
        ));
    }

    let standard_error = diagnostics::fit_standard_error(rss, nstar, degree);
    let df_error = (nstar - degree) as f64;
    let t_crit = if nstar > degree {
        t_critical(df_error, alpha)?
    } else {
        0.0
    };

    let std_errors = coefficient_standard_errors(standard_error, &fit.gram_inverse, fixed);
    let coefficients = coefficient_table(&fit.coefficients, &std_errors, df_error, t_crit)?;

    let anova_table = if degree >= 1 && nstar > degree {
        Some(anova(tss, rss, degree, nstar)?)
    } else {
        None
    };

    let covariance = covariance_matrix(standard_error, &fit.gram_inverse, fixed);
    let correlation = correlation_matrix(&covariance);

    Ok(FitReport {
        observations: n,
        nstar,
        degree,
        alpha,
        rss,
        tss,
        r_squared: diagnostics::r_squared(rss, tss),
        r_squared_adjusted: diagnostics::r_squared_adjusted(rss, tss, nstar, degree),
        standard_error,
        t_critical: t_crit,
        coefficients,
        anova: anova_table,
        covariance,
        correlation,
    })
}

// =============================================================================
// Tests
// =============================================================================
