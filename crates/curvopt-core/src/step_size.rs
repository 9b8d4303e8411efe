//! Step length control.
//!
//! Two pieces live here:
//!
//! - [`StepLimiter`] caps the Euclidean norm of a proposed step while keeping
//!   its direction. Every optimizer passes its raw direction through it, which
//!   acts as a crude trust region.
//! - [`barzilai_borwein_step`] derives the next scalar step length of
//!   gradient descent from the secant pair of the previous iteration.
//!
//! # Barzilai-Borwein step
//!
//! With `dx = xₖ₊₁ - xₖ` and `dg = gₖ₊₁ - gₖ`, the classical BB step
//! `αₖ₊₁ = (dx·dg) / (dg·dg)` is the least-squares fit of `α·dg ≈ dx`.
//! Gradient descent here moves along the *unit* gradient, so the step length
//! is scaled back by the previous gradient norm:
//!
//! ```text
//! s = (dx·dg) · ‖gₖ‖ / (dg·dg)
//! ```
//!
//! The denominator is not guarded. At a true stationary point the
//! convergence test stops the run first; otherwise `dg = 0` yields `inf` or
//! `NaN`, which propagates into the next iterate.

use crate::types::{DVector, Scalar};
use num_traits::Float;

/// Caps step vectors at a maximum Euclidean norm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepLimiter<T: Scalar> {
    max_norm: T,
}

impl<T: Scalar> StepLimiter<T> {
    /// Creates a limiter for steps of norm at most `max_norm`.
    ///
    /// `max_norm` is expected to be positive; optimizer configurations
    /// validate it before building a limiter.
    pub fn new(max_norm: T) -> Self {
        Self { max_norm }
    }

    /// The configured maximum norm.
    pub fn max_norm(&self) -> T {
        self.max_norm
    }

    /// Returns `step` unchanged if its norm is strictly below the maximum,
    /// otherwise `step` rescaled to norm exactly the maximum.
    pub fn limit(&self, step: &DVector<T>) -> DVector<T> {
        let mut limited = step.clone();
        self.limit_in_place(&mut limited);
        limited
    }

    /// In-place variant of [`limit`](Self::limit). Returns `true` when the
    /// step was shortened.
    pub fn limit_in_place(&self, step: &mut DVector<T>) -> bool {
        let norm = step.norm();
        if norm < self.max_norm {
            return false;
        }
        *step *= self.max_norm / norm;
        true
    }
}

/// Functional form of [`StepLimiter::limit`].
pub fn enforce_max_step<T: Scalar>(step: &DVector<T>, max_norm: T) -> DVector<T> {
    StepLimiter::new(max_norm).limit(step)
}

/// Scalar step length of the Barzilai-Borwein rule for unit-gradient descent.
///
/// `step` is the step just taken, `gradient_change` the difference of the
/// new and previous gradients, and `previous_gradient_norm` the Euclidean
/// norm of the previous gradient.
pub fn barzilai_borwein_step<T: Scalar>(
    step: &DVector<T>,
    gradient_change: &DVector<T>,
    previous_gradient_norm: T,
) -> T {
    step.dot(gradient_change) * previous_gradient_norm / gradient_change.dot(gradient_change)
}

/// Whether a scalar step length keeps the iteration moving downhill.
pub fn is_descent_step<T: Scalar>(step_length: T) -> bool {
    <T as Float>::is_finite(step_length) && step_length > T::zero()
}
