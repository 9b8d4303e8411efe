//! Error types for surface evaluation and optimization runs.
//!
//! Non-convergence is deliberately absent from this module: running out of
//! iterations is reported through
//! [`ConvergenceStatus`](crate::optimizer::ConvergenceStatus) on a successful
//! result, never as an error.

use thiserror::Error;

/// Errors raised by a surface while evaluating one of its oracles.
#[derive(Debug, Clone, Error)]
pub enum SurfaceError {
    /// The point cannot be evaluated by this surface.
    #[error("Invalid point: {reason}")]
    InvalidPoint {
        /// Description of why the point is invalid
        reason: String,
    },

    /// Dimension mismatch between the point and the surface.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions
        expected: String,
        /// Actual dimensions
        actual: String,
    },

    /// Numerical failure inside the oracle.
    #[error("Numerical instability detected: {reason}")]
    NumericalError {
        /// Description of the numerical issue
        reason: String,
    },

    /// The surface does not provide this oracle.
    ///
    /// Returned by the default `hessian` implementation.
    #[error("Feature not implemented: {feature}")]
    NotImplemented {
        /// Name of the unimplemented feature
        feature: String,
    },
}

impl SurfaceError {
    /// Create an InvalidPoint error with a custom reason.
    pub fn invalid_point<S: Into<String>>(reason: S) -> Self {
        Self::InvalidPoint {
            reason: reason.into(),
        }
    }

    /// Create a DimensionMismatch error.
    pub fn dimension_mismatch<S1, S2>(expected: S1, actual: S2) -> Self
    where
        S1: std::fmt::Display,
        S2: std::fmt::Display,
    {
        Self::DimensionMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create a NumericalError with a custom reason.
    pub fn numerical_error<S: Into<String>>(reason: S) -> Self {
        Self::NumericalError {
            reason: reason.into(),
        }
    }

    /// Create a NotImplemented error for a specific feature.
    pub fn not_implemented<S: Into<String>>(feature: S) -> Self {
        Self::NotImplemented {
            feature: feature.into(),
        }
    }
}

/// Errors that abort an optimization run.
#[derive(Debug, Clone, Error)]
pub enum OptimizerError {
    /// Invalid optimizer configuration.
    ///
    /// Raised before any oracle is called.
    #[error("Invalid optimizer configuration: {reason}")]
    InvalidConfiguration {
        /// Description of the configuration error
        reason: String,
        /// Name of the invalid parameter
        parameter: String,
        /// Value that was invalid
        value: String,
    },

    /// The initial point cannot start a run.
    #[error("Invalid initial point: {reason}")]
    InvalidInitialPoint {
        /// Description of the problem
        reason: String,
    },

    /// An oracle returned a value of the wrong shape.
    #[error("Dimension mismatch in {quantity}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Which quantity had the wrong shape (gradient, Hessian, ...)
        quantity: String,
        /// Expected shape
        expected: String,
        /// Actual shape
        actual: String,
    },

    /// A linear-algebra routine failed, typically on non-finite input.
    #[error("Numerical failure: {reason}")]
    NumericalError {
        /// Description of the numerical issue
        reason: String,
    },

    /// Propagated surface error.
    #[error("Surface evaluation failed: {0}")]
    Surface(#[from] SurfaceError),
}

impl OptimizerError {
    /// Create an InvalidConfiguration error.
    pub fn invalid_configuration<S1, S2, S3>(reason: S1, parameter: S2, value: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self::InvalidConfiguration {
            reason: reason.into(),
            parameter: parameter.into(),
            value: value.into(),
        }
    }

    /// Create an InvalidInitialPoint error.
    pub fn invalid_initial_point<S: Into<String>>(reason: S) -> Self {
        Self::InvalidInitialPoint {
            reason: reason.into(),
        }
    }

    /// Create a DimensionMismatch error for the named quantity.
    pub fn dimension_mismatch<S, E, A>(quantity: S, expected: E, actual: A) -> Self
    where
        S: Into<String>,
        E: std::fmt::Display,
        A: std::fmt::Display,
    {
        Self::DimensionMismatch {
            quantity: quantity.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create a NumericalError with a custom reason.
    pub fn numerical_error<S: Into<String>>(reason: S) -> Self {
        Self::NumericalError {
            reason: reason.into(),
        }
    }
}

/// Result type alias for surface evaluations.
pub type Result<T> = std::result::Result<T, SurfaceError>;

/// Result type alias for optimizer operations.
pub type OptimizerResult<T> = std::result::Result<T, OptimizerError>;
