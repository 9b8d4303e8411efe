//! Symmetric-Rank-1 (SR1) Hessian approximation.
//!
//! Given the secant pair of one iteration, `dx = x - x₀` and `dg = g - g₀`,
//! SR1 corrects the previous approximation `H₀` with the rank-one term that
//! makes the new matrix satisfy the secant equation `H·dx = dg`:
//!
//! ```text
//! r = dg - H₀·dx
//! H = H₀ + (r ⊗ r) / (r · dx)
//! ```
//!
//! Unlike BFGS, SR1 does not force positive definiteness, which lets it track
//! the indefinite curvature around saddle points. The price is the classical
//! breakdown when `r · dx` vanishes while `r` does not.
//!
//! # Degenerate cases
//!
//! - `‖dx‖ < ε` (machine epsilon): the update is skipped and `H₀` returned
//!   unchanged. This is always active.
//! - `r · dx ≈ 0`: not guarded by default. A zero denominator produces
//!   `inf`/`NaN` entries, exactly as the bare formula does. Callers can opt
//!   into the textbook safeguard with [`SkipRule::Relative`], which skips the
//!   update when `|r·dx| < τ‖r‖‖dx‖`.

use crate::types::{DMatrix, DVector, Scalar};
use num_traits::Float;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// When to skip an SR1 update whose denominator is small.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SkipRule<T> {
    /// Always apply the update (only the small-step guard is active).
    #[default]
    Never,
    /// Skip when `|r·dx| < τ‖r‖‖dx‖`.
    Relative(T),
}

/// What an SR1 update did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sr1Outcome {
    /// The rank-one correction was added.
    Applied,
    /// `‖dx‖` was below machine epsilon; the matrix is unchanged.
    SkippedSmallStep,
    /// The skip rule rejected the update; the matrix is unchanged.
    SkippedIllConditioned,
}

impl Sr1Outcome {
    /// Whether the matrix was modified.
    pub fn applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// SR1 updater.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sr1Update<T> {
    skip_rule: SkipRule<T>,
}

impl<T: Scalar> Sr1Update<T> {
    /// Creates an updater with no denominator safeguard.
    pub fn new() -> Self {
        Self {
            skip_rule: SkipRule::Never,
        }
    }

    /// Sets the denominator safeguard.
    pub fn with_skip_rule(mut self, skip_rule: SkipRule<T>) -> Self {
        self.skip_rule = skip_rule;
        self
    }

    /// The active skip rule.
    pub fn skip_rule(&self) -> SkipRule<T> {
        self.skip_rule
    }

    /// Returns the updated approximation.
    ///
    /// `x`/`g` are the new point and gradient, `x0`/`g0` the previous ones
    /// and `h0` the previous approximation.
    pub fn update(
        &self,
        x: &DVector<T>,
        g: &DVector<T>,
        x0: &DVector<T>,
        g0: &DVector<T>,
        h0: &DMatrix<T>,
    ) -> DMatrix<T> {
        let mut h = h0.clone();
        self.update_in_place(x, g, x0, g0, &mut h);
        h
    }

    /// Updates `h` in place and reports whether the correction was applied.
    pub fn update_in_place(
        &self,
        x: &DVector<T>,
        g: &DVector<T>,
        x0: &DVector<T>,
        g0: &DVector<T>,
        h: &mut DMatrix<T>,
    ) -> Sr1Outcome {
        let dx = x - x0;
        if dx.norm() < T::EPSILON {
            return Sr1Outcome::SkippedSmallStep;
        }

        let dg = g - g0;
        let residual = dg - &*h * &dx;
        let denominator = residual.dot(&dx);

        if let SkipRule::Relative(tau) = self.skip_rule {
            if <T as Float>::abs(denominator) < tau * residual.norm() * dx.norm() {
                return Sr1Outcome::SkippedIllConditioned;
            }
        }

        *h += (&residual * residual.transpose()) / denominator;
        Sr1Outcome::Applied
    }
}

/// Functional form of [`Sr1Update::update`] with no denominator safeguard.
pub fn sr1_update<T: Scalar>(
    x: &DVector<T>,
    g: &DVector<T>,
    x0: &DVector<T>,
    g0: &DVector<T>,
    h0: &DMatrix<T>,
) -> DMatrix<T> {
    Sr1Update::new().update(x, g, x0, g0, h0)
}

/// The initial quasi-Newton approximation `(‖g₀‖ / smax) · I`.
///
/// With this scaling the first quasi-Newton step has length exactly `smax`.
pub fn scaled_identity<T: Scalar>(dim: usize, gradient: &DVector<T>, max_step: T) -> DMatrix<T> {
    DMatrix::identity(dim, dim) * (gradient.norm() / max_step)
}
