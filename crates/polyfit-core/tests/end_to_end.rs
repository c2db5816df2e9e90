// End-to-end runs of the full pipeline: weight matrix -> fit -> report ->
// bands, exercised through the public API only.

use approx::assert_abs_diff_eq;
use ndarray::{array, Array1};

use polyfit_core::{
    confidence_bands, fit, summarize, weight_matrix, PolyFitError, WeightMode, BAND_POINTS,
};

#[test]
fn straight_line_fit_recovers_generating_model() {
    // y = 1 + 2x, no weighting, free intercept.
    let x = array![0.0, 1.0, 2.0, 3.0];
    let y = array![1.0, 3.0, 5.0, 7.0];
    let w = weight_matrix(&Array1::zeros(0), 4, WeightMode::None).unwrap();

    let result = fit(&x, &y, 1, None, &w).unwrap();
    assert_abs_diff_eq!(result.coefficients[0], 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(result.coefficients[1], 2.0, epsilon = 1e-9);

    let report = summarize(&x, &y, &result, &w, 0.05).unwrap();
    assert_eq!(report.observations, 4);
    assert_eq!(report.nstar, 3);
    assert_abs_diff_eq!(report.rss, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(report.tss, 20.0, epsilon = 1e-9);
    assert_abs_diff_eq!(report.r_squared, 1.0, epsilon = 1e-9);
    // Exact fit: standard error stays at zero.
    assert_abs_diff_eq!(report.standard_error, 0.0, epsilon = 1e-9);
}

#[test]
fn noisy_quadratic_fit_produces_sensible_report() {
    // y = 0.5 + 1.5x + 2x² plus small perturbations.
    let x = array![-3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0, 4.0];
    let clean = x.mapv(|xi| 0.5 + 1.5 * xi + 2.0 * xi * xi);
    let noise = array![0.08, -0.11, 0.05, -0.02, 0.09, -0.07, 0.04, -0.10];
    let y = &clean + &noise;
    let w = weight_matrix(&Array1::zeros(0), 8, WeightMode::None).unwrap();

    let result = fit(&x, &y, 2, None, &w).unwrap();
    assert_abs_diff_eq!(result.coefficients[0], 0.5, epsilon = 0.2);
    assert_abs_diff_eq!(result.coefficients[1], 1.5, epsilon = 0.2);
    assert_abs_diff_eq!(result.coefficients[2], 2.0, epsilon = 0.1);

    let report = summarize(&x, &y, &result, &w, 0.05).unwrap();
    assert!(report.rss > 0.0);
    assert!(report.r_squared > 0.99 && report.r_squared < 1.0);
    assert!(report.r_squared_adjusted <= report.r_squared);
    assert!(report.standard_error > 0.0);
    assert!(report.t_critical > 0.0);

    // The quadratic term is overwhelmingly significant.
    let quad = &report.coefficients[2];
    let p = quad.p_value.unwrap();
    assert!(p < 0.001, "expected a tiny tail probability, got {}", p);
    assert!(quad.ci_low < 2.0 && 2.0 < quad.ci_high);

    // ANOVA decomposition is consistent: SS_model + SS_error = SS_total.
    let anova = report.anova.as_ref().unwrap();
    assert_abs_diff_eq!(anova.ss_model + anova.ss_error, anova.ss_total, epsilon = 1e-9);
    assert!(anova.f_statistic > 0.0);
    assert!(anova.p_value < 0.001);
    assert_abs_diff_eq!(anova.df_model, 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(anova.df_error, 5.0, epsilon = 1e-12);

    // Correlation matrix has a unit diagonal.
    for i in 0..3 {
        assert_abs_diff_eq!(report.correlation[[i, i]], 1.0, epsilon = 1e-9);
    }
}

#[test]
fn fixed_intercept_is_recovered_exactly_with_zero_uncertainty() {
    // Data generated as c + noise, intercept pinned to c.
    let c = 5.0;
    let x = array![1.0, 2.0, 3.0, 4.0, 5.0];
    let y = array![5.1, 4.9, 5.2, 4.8, 5.05];
    let w = weight_matrix(&Array1::zeros(0), 5, WeightMode::None).unwrap();

    let result = fit(&x, &y, 1, Some(c), &w).unwrap();
    assert_eq!(result.coefficients[0], c);

    let report = summarize(&x, &y, &result, &w, 0.05).unwrap();
    assert_eq!(report.nstar, 5);
    // A pinned value carries no uncertainty.
    assert_eq!(report.coefficients[0].std_error, 0.0);
    assert!(report.coefficients[0].t_statistic.is_none());
    assert!(report.coefficients[0].p_value.is_none());
    // The slope, by contrast, gets a real interval.
    assert!(report.coefficients[1].std_error > 0.0);
}

#[test]
fn zero_error_point_trips_the_singular_weight_guard() {
    let x = array![0.0, 1.0, 2.0, 3.0];
    let y = array![1.0, 3.0, 5.0, 7.0];
    let errors = array![0.1, 0.2, 0.0, 0.1]; // third point unusable
    let w = weight_matrix(&errors, 4, WeightMode::InverseVariance).unwrap();

    let result = fit(&x, &y, 1, None, &w);
    assert!(matches!(result, Err(PolyFitError::InvalidInput(_))));
}

#[test]
fn inverse_variance_weighting_favors_precise_points() {
    // Two competing lines; the precise points lie on y = 2x.
    let x = array![0.0, 1.0, 2.0, 3.0, 1.5];
    let y = array![0.0, 2.0, 4.0, 6.0, 10.0]; // last point is an outlier
    let errors = array![0.1, 0.1, 0.1, 0.1, 50.0];
    let w = weight_matrix(&errors, 5, WeightMode::InverseVariance).unwrap();

    let result = fit(&x, &y, 1, None, &w).unwrap();
    // The heavily down-weighted outlier barely moves the line.
    assert_abs_diff_eq!(result.coefficients[0], 0.0, epsilon = 1e-2);
    assert_abs_diff_eq!(result.coefficients[1], 2.0, epsilon = 1e-2);
}

#[test]
fn exact_interpolation_when_degree_equals_dof() {
    // Three points, degree 2, free intercept: nstar = 2 = k.
    let x = array![0.0, 1.0, 2.0];
    let y = array![1.0, 2.0, 5.0];
    let w = weight_matrix(&Array1::zeros(0), 3, WeightMode::None).unwrap();

    let result = fit(&x, &y, 2, None, &w).unwrap();
    let report = summarize(&x, &y, &result, &w, 0.05).unwrap();

    assert_abs_diff_eq!(report.rss, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(report.r_squared, 1.0, epsilon = 1e-9);
    assert_eq!(report.standard_error, 0.0);
    assert_eq!(report.t_critical, 0.0);
    assert!(report.r_squared_adjusted.is_nan());
    assert!(report.anova.is_none());
}

#[test]
fn bands_span_the_data_and_respect_nesting() {
    let x = array![0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
    let y = array![0.9, 3.2, 4.8, 7.1, 9.0, 11.2];
    let w = weight_matrix(&Array1::zeros(0), 6, WeightMode::None).unwrap();

    let result = fit(&x, &y, 1, None, &w).unwrap();
    let report = summarize(&x, &y, &result, &w, 0.05).unwrap();

    let bands = confidence_bands(
        &x,
        &result.coefficients,
        &result.gram_inverse,
        report.t_critical,
        report.standard_error,
    )
    .unwrap();

    assert_eq!(bands.len(), BAND_POINTS);
    assert_abs_diff_eq!(bands[0].x, 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(bands[BAND_POINTS - 1].x, 5.0, epsilon = 1e-12);

    for point in &bands {
        assert!(point.pred_low <= point.ci_low);
        assert!(point.ci_low <= point.y);
        assert!(point.y <= point.ci_high);
        assert!(point.ci_high <= point.pred_high);
    }

    // The confidence band is narrowest near the weighted center of x.
    let mid = &bands[BAND_POINTS / 2];
    let edge = &bands[0];
    assert!(mid.ci_high - mid.ci_low < edge.ci_high - edge.ci_low);
}

#[test]
fn constant_response_is_reported_as_undefined_not_scored() {
    // All responses equal: TSS = 0 with a free intercept, R² undefined.
    let x = array![0.0, 1.0, 2.0, 3.0];
    let y = array![4.0, 4.0, 4.0, 4.0];
    let w = weight_matrix(&Array1::zeros(0), 4, WeightMode::None).unwrap();

    let result = fit(&x, &y, 1, None, &w).unwrap();
    let report = summarize(&x, &y, &result, &w, 0.05);
    assert!(matches!(report, Err(PolyFitError::InvalidInput(_))));
}
