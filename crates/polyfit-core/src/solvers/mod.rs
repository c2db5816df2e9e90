// =============================================================================
// Polynomial Fit Solver
// =============================================================================
//
// This module solves the weighted least-squares problem for a polynomial
// model in one variable:
//
//     minimize over β:   Σ_i W_ii (y_i - Σ_j β_j x_i^j)²
//
// The solve goes through the normal equations. With X the design matrix of
// integer powers of x and W the diagonal weight matrix,
//
//     (Xᵗ W X) β = Xᵗ W y
//
// the Gram matrix Xᵗ W X is (k+1)×(k+1) for degree k, small enough to invert
// explicitly. The inverse is kept in the result because the inference layer
// needs it for every variance computation downstream.
//
// FIXED INTERCEPT
// ---------------
// The degree-0 coefficient can be pinned to a caller-supplied constant
// instead of being estimated. The constant is subtracted from the response,
// the intercept column drops out of the Gram matrix, and its diagonal entry
// is pinned to 1 so the matrix stays invertible. The pinned value is written
// back into the coefficient vector after the solve.
//
// =============================================================================

mod wls;

pub use wls::{fit, FitResult};
