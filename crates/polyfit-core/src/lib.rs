// =============================================================================
// PolyFit Core Library
// =============================================================================
//
// Weighted least-squares polynomial fitting with inferential statistics:
// fit a polynomial of chosen degree to (x, y) observations, then derive
// coefficient standard errors, confidence intervals, an ANOVA table,
// goodness-of-fit measures, and pointwise confidence/prediction bands.
//
// STRUCTURE:
// ----------
// The library is organized into modules, each handling a specific concern:
//
//   - linalg:      dense matrix utilities (determinant, adjugate inverse)
//   - special:     incomplete beta function and the Student-t / Fisher-F
//                  distributions built on it
//   - weights:     observation weight matrix construction
//   - solvers:     the weighted least-squares normal-equations solve
//   - poly:        polynomial evaluation helpers
//   - diagnostics: sums of squares, R², standard error of the fit
//   - inference:   coefficient inference, ANOVA, covariance/correlation,
//                  confidence and prediction bands
//   - error:       error types used throughout the library
//
// A typical fit runs: build a weight matrix, call `fit`, then feed the
// result to `summarize` and `confidence_bands`. The engine is stateless;
// every fit owns its scratch matrices and nothing persists across calls.
//
// Reading the data, rendering the report, and writing band tables are the
// caller's business; this crate computes and stays silent (solver matrix
// dumps go through the `log` facade at debug level).
//
// =============================================================================

pub mod diagnostics;
pub mod error;
pub mod inference;
pub mod linalg;
pub mod poly;
pub mod solvers;
pub mod special;
pub mod weights;

// Re-export the main entry points at the top level so users can write
// `polyfit_core::fit` instead of `polyfit_core::solvers::fit`.
pub use error::{PolyFitError, Result};
pub use inference::bands::{confidence_bands, BandPoint, BAND_POINTS};
pub use inference::{summarize, AnovaTable, CoefficientInference, FitReport};
pub use poly::{polynomial_derivative, polynomial_value};
pub use solvers::{fit, FitResult};
pub use weights::{weight_matrix, WeightMode};
