//! Type definitions and aliases for curvature-based optimization.
//!
//! This module provides common type aliases, the numeric trait shared by all
//! optimizers, and the default constants they are configured with.

use nalgebra::{OMatrix, OVector, Dyn, RealField, Scalar as NalgebraScalar};
use num_traits::{Float, FromPrimitive};
use std::fmt::{Debug, Display};

/// Trait for scalar types used in optimization (f32 or f64).
///
/// This trait combines all the numeric traits the optimizers rely on:
/// nalgebra's `RealField` for linear algebra (SVD, norms) and
/// `num_traits::Float` for elementwise arithmetic.
pub trait Scalar:
    NalgebraScalar
    + RealField
    + Float
    + FromPrimitive
    + Display
    + Debug
    + Default
    + Copy
    + Send
    + Sync
    + 'static
{
    /// Machine epsilon for this scalar type.
    const EPSILON: Self;

    /// Default maximum Euclidean norm of a single step.
    const DEFAULT_MAX_STEP: Self;

    /// Default tolerance on the L∞ norm of the gradient.
    const DEFAULT_GRADIENT_TOLERANCE: Self;

    /// Relative cutoff below which singular values are treated as zero
    /// when forming a pseudoinverse.
    const PSEUDO_INVERSE_RCOND: Self;

    /// Convert from f64 (for constants).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails.
    fn from_f64(v: f64) -> Self {
        <Self as FromPrimitive>::from_f64(v).expect("Failed to convert from f64")
    }

    /// Convert to f64 (for logging/display).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails. Use `try_to_f64` for a non-panicking version.
    fn to_f64(self) -> f64 {
        num_traits::cast(self).expect("Failed to convert to f64")
    }

    /// Try to convert to f64.
    ///
    /// Returns None if the conversion fails.
    fn try_to_f64(self) -> Option<f64> {
        num_traits::cast(self)
    }
}

impl Scalar for f32 {
    const EPSILON: Self = f32::EPSILON;
    const DEFAULT_MAX_STEP: Self = 0.3;
    const DEFAULT_GRADIENT_TOLERANCE: Self = 1e-5;
    const PSEUDO_INVERSE_RCOND: Self = 1e-6;
}

impl Scalar for f64 {
    const EPSILON: Self = f64::EPSILON;
    const DEFAULT_MAX_STEP: Self = 0.3;
    const DEFAULT_GRADIENT_TOLERANCE: Self = 1e-5;
    const PSEUDO_INVERSE_RCOND: Self = 1e-15;
}

/// Type alias for a dynamically-sized matrix.
pub type DMatrix<T> = OMatrix<T, Dyn, Dyn>;

/// Type alias for a dynamically-sized vector.
pub type DVector<T> = OVector<T, Dyn>;

/// A point in the search space.
pub type Point<T> = DVector<T>;

/// A gradient evaluated at some point.
pub type Gradient<T> = DVector<T>;

/// Default iteration budget for every optimizer.
pub const DEFAULT_MAX_ITERATIONS: usize = 50;
