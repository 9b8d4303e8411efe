//! Damped saddle surface.
//!
//! ```text
//! f(x, y) = (1 - y²) · x² · e^{-x²} + y² / 2
//! ```
//!
//! The origin is a strict local minimum with Hessian `diag(2, 1)`. Along the
//! lines `y = ±1` the first term vanishes, and for `|y| > 1` the surface
//! bends downwards in `x`, so the landscape mixes positive and negative
//! curvature within a short distance of the minimum. This makes it a good
//! probe for how an optimizer's curvature model copes with indefinite
//! Hessians: Newton-type steps can point uphill, and the step limit is what
//! keeps them from running away.

use crate::utils::planar;
use curvopt_core::{
    error::Result,
    surface::DifferentiableSurface,
    types::{DMatrix, Gradient, Point, Scalar},
};
use num_traits::Float;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The two-variable damped saddle `(1 - y²)x²e^{-x²} + y²/2`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DampedSaddle;

impl DampedSaddle {
    /// Creates the surface.
    pub fn new() -> Self {
        Self
    }

    /// The strict local minimum.
    pub fn minimizer<T: Scalar>(&self) -> Point<T> {
        Point::zeros(2)
    }
}

impl<T: Scalar> DifferentiableSurface<T> for DampedSaddle {
    fn value(&self, point: &Point<T>) -> Result<T> {
        let (x, y) = planar(point)?;
        let one = T::one();
        let half = <T as Scalar>::from_f64(0.5);
        let x2 = x * x;
        let y2 = y * y;

        Ok((one - y2) * x2 * <T as Float>::exp(-x2) + half * y2)
    }

    fn gradient(&self, point: &Point<T>) -> Result<Gradient<T>> {
        let (x, y) = planar(point)?;
        let one = T::one();
        let two = <T as Scalar>::from_f64(2.0);
        let x2 = x * x;
        let damping = <T as Float>::exp(-x2);

        let gx = two * (one - y * y) * x * (one - x2) * damping;
        let gy = y * (one - two * x2 * damping);

        Ok(Gradient::from_vec(vec![gx, gy]))
    }

    fn hessian(&self, point: &Point<T>) -> Result<DMatrix<T>> {
        let (x, y) = planar(point)?;
        let one = T::one();
        let two = <T as Scalar>::from_f64(2.0);
        let four = <T as Scalar>::from_f64(4.0);
        let five = <T as Scalar>::from_f64(5.0);
        let x2 = x * x;
        let damping = <T as Float>::exp(-x2);

        let hxx = two * (one - y * y) * (one - five * x2 + two * x2 * x2) * damping;
        let hxy = -four * y * x * (one - x2) * damping;
        let hyy = one - two * x2 * damping;

        Ok(DMatrix::from_row_slice(2, 2, &[hxx, hxy, hxy, hyy]))
    }

    fn dimension(&self) -> Option<usize> {
        Some(2)
    }
}
