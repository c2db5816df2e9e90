// =============================================================================
// Dense Matrix Utilities
// =============================================================================
//
// A minimal linear algebra layer for the small square systems this crate
// works with: the Gram matrix of a polynomial fit is (k+1)×(k+1) where k is
// the polynomial degree, so n here is rarely above 20.
//
// Transpose and products use ndarray's `.t()` and `.dot()` directly at the
// call sites; this module provides the two operations ndarray does not:
//
//   - `determinant`: partial-pivot Gaussian elimination on a working copy
//   - `invert`:      the classical cofactor/adjugate inverse
//
// WHY THE ADJUGATE METHOD?
// ------------------------
// Computing every (n-1)×(n-1) minor makes `invert` roughly O(n⁴). That is
// fine for the matrix sizes above, and the method needs no pivoting decisions
// on the matrix being inverted, which keeps its output deterministic across
// platforms. `invert` is the single entry point for inversion in this crate,
// so an LU-based implementation can replace the internals without touching
// any caller.
//
// =============================================================================

use ndarray::Array2;

use crate::error::{PolyFitError, Result};

/// Determinant of a square matrix via Gaussian elimination with partial
/// pivoting.
///
/// Works on a copy; the input is untouched. Row swaps flip the sign of the
/// result. A zero pivot after pivot selection means the matrix is singular
/// and the function returns 0 immediately.
///
/// # Panics
/// Panics in debug builds if the matrix is not square.
pub fn determinant(a: &Array2<f64>) -> f64 {
    let n = a.nrows();
    debug_assert_eq!(n, a.ncols(), "determinant requires a square matrix");

    let mut m = a.clone();
    let mut det = 1.0;

    for i in 0..n {
        // Select the largest remaining pivot in column i.
        let mut pivot = i;
        for j in (i + 1)..n {
            if m[[j, i]].abs() > m[[pivot, i]].abs() {
                pivot = j;
            }
        }
        if pivot != i {
            for col in 0..n {
                m.swap([i, col], [pivot, col]);
            }
            det = -det;
        }

        if m[[i, i]] == 0.0 {
            return 0.0;
        }
        det *= m[[i, i]];

        // Eliminate below the pivot. Column i entries are never read again,
        // so only columns to the right are updated.
        for j in (i + 1)..n {
            let factor = m[[j, i]] / m[[i, i]];
            for col in (i + 1)..n {
                m[[j, col]] -= factor * m[[i, col]];
            }
        }
    }

    det
}

/// Inverse of a square matrix via the cofactor/adjugate method.
///
/// For every entry (q, p) the (n-1)×(n-1) minor excluding row q and column p
/// is built, its determinant taken, and the sign (-1)^(q+p) applied. The
/// resulting cofactor matrix is transposed (giving the adjugate) and divided
/// by the determinant of the input.
///
/// Returns `SingularSystem` when the determinant is exactly zero; the inverse
/// does not exist in that case and silently returning non-finite entries
/// would poison every downstream variance computation.
pub fn invert(a: &Array2<f64>) -> Result<Array2<f64>> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(PolyFitError::DimensionMismatch(format!(
            "cannot invert a {} x {} matrix",
            a.nrows(),
            a.ncols()
        )));
    }
    if n == 0 {
        return Err(PolyFitError::EmptyInput("cannot invert an empty matrix".to_string()));
    }

    let det = determinant(a);
    if det == 0.0 {
        return Err(PolyFitError::SingularSystem(
            "matrix determinant is zero, inverse does not exist".to_string(),
        ));
    }

    let mut cofactors = Array2::zeros((n, n));
    for q in 0..n {
        for p in 0..n {
            let sign = if (q + p) % 2 == 0 { 1.0 } else { -1.0 };
            cofactors[[q, p]] = sign * determinant(&minor(a, q, p));
        }
    }

    // adjugate / det
    Ok(cofactors.t().mapv(|c| c / det))
}

/// The (n-1)×(n-1) submatrix excluding `row` and `col`.
///
/// For a 1×1 input this is the empty matrix, whose determinant is 1 by
/// convention, which makes the 1×1 inverse fall out of the general path.
fn minor(a: &Array2<f64>, row: usize, col: usize) -> Array2<f64> {
    let n = a.nrows();
    let mut m = Array2::zeros((n - 1, n - 1));
    let mut r = 0;
    for i in 0..n {
        if i == row {
            continue;
        }
        let mut c = 0;
        for j in 0..n {
            if j == col {
                continue;
            }
            m[[r, c]] = a[[i, j]];
            c += 1;
        }
        r += 1;
    }
    m
}

// =============================================================================
// Tests
// =============================================================================
