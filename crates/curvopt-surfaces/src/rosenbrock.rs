//! Rosenbrock's banana function `(a - x)² + b(y - x²)²`.

use crate::utils::planar;
use curvopt_core::{
    error::Result,
    surface::DifferentiableSurface,
    types::{DMatrix, Gradient, Point, Scalar},
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rosenbrock surface with parameters `a` and `b`.
///
/// The global minimum sits at `(a, a²)` at the bottom of a long, curved,
/// flat valley; the classical choice is `a = 1`, `b = 100`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rosenbrock<T> {
    a: T,
    b: T,
}

impl<T: Scalar> Default for Rosenbrock<T> {
    fn default() -> Self {
        Self::new(T::one(), <T as Scalar>::from_f64(100.0))
    }
}

impl<T: Scalar> Rosenbrock<T> {
    /// Creates the surface `(a - x)² + b(y - x²)²`.
    pub fn new(a: T, b: T) -> Self {
        Self { a, b }
    }

    /// The global minimizer `(a, a²)`.
    pub fn minimizer(&self) -> Point<T> {
        Point::from_vec(vec![self.a, self.a * self.a])
    }
}

impl<T: Scalar> DifferentiableSurface<T> for Rosenbrock<T> {
    fn value(&self, point: &Point<T>) -> Result<T> {
        let (x, y) = planar(point)?;
        let dx = self.a - x;
        let valley = y - x * x;
        Ok(dx * dx + self.b * valley * valley)
    }

    fn gradient(&self, point: &Point<T>) -> Result<Gradient<T>> {
        let (x, y) = planar(point)?;
        let two = <T as Scalar>::from_f64(2.0);
        let four = <T as Scalar>::from_f64(4.0);
        let valley = y - x * x;

        Ok(Gradient::from_vec(vec![
            -two * (self.a - x) - four * self.b * x * valley,
            two * self.b * valley,
        ]))
    }

    fn hessian(&self, point: &Point<T>) -> Result<DMatrix<T>> {
        let (x, y) = planar(point)?;
        let two = <T as Scalar>::from_f64(2.0);
        let four = <T as Scalar>::from_f64(4.0);
        let twelve = <T as Scalar>::from_f64(12.0);

        let hxx = two - four * self.b * y + twelve * self.b * x * x;
        let hxy = -four * self.b * x;
        let hyy = two * self.b;

        Ok(DMatrix::from_row_slice(2, 2, &[hxx, hxy, hxy, hyy]))
    }

    fn dimension(&self) -> Option<usize> {
        Some(2)
    }
}
