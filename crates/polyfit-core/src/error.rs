// =============================================================================
// Error Types
// =============================================================================
//
// Every fallible operation in this crate returns `Result<T>` with one of the
// variants below. The taxonomy mirrors the three ways a fit can go wrong:
//
//   - The caller handed us something unusable (InvalidInput, DimensionMismatch,
//     EmptyInput). These are detected before any matrix work starts.
//   - A special-function evaluation ran out of its iteration budget
//     (NonConvergence). This is rare and localized; it never corrupts state.
//   - A matrix that must be inverted has a zero determinant (SingularSystem).
//     The coefficient solve is undefined in that case.
//
// None of these are retried. A failed fit leaves no partial state behind.
//
// =============================================================================

use thiserror::Error;

/// Errors that can occur during polynomial fitting and inference.
#[derive(Error, Debug)]
pub enum PolyFitError {
    /// Input violates a documented precondition: polynomial degree exceeds the
    /// available degrees of freedom, a weight specification produces a singular
    /// weight matrix, or a special-function argument is outside its domain.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Two inputs that must have matching dimensions do not.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// An input sequence is empty where at least one element is required.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// An iterative numerical evaluation exhausted its iteration budget
    /// without meeting its convergence tolerance.
    #[error("Numerical non-convergence: {0}")]
    NonConvergence(String),

    /// A matrix that must be inverted has determinant zero.
    #[error("Singular system: {0}")]
    SingularSystem(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PolyFitError>;
