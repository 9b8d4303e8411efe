//! Surface interface consumed by the optimizers.
//!
//! A surface is the bundle of oracles an optimizer may query: the function
//! value, its gradient and (optionally) its Hessian. The optimizers only ever
//! depend on [`DifferentiableSurface`]; concrete analytic surfaces live in
//! `curvopt-surfaces`, and [`FnSurface`] turns plain closures into a surface.
//!
//! The function value oracle is part of the interface so that callers can
//! evaluate and report the objective, but none of the optimizers evaluate it
//! inside their iteration loop.

use crate::{
    error::{Result, SurfaceError},
    types::{DMatrix, Gradient, Point, Scalar},
};
use num_traits::Float;
use std::cell::Cell;
use std::fmt::{self, Debug};
use std::marker::PhantomData;

/// Trait for smooth scalar surfaces over `d` real variables.
///
/// Oracles must be deterministic and defined at every point an optimizer
/// visits.
pub trait DifferentiableSurface<T>: Debug
where
    T: Scalar,
{
    /// Evaluates the surface at a point.
    fn value(&self, point: &Point<T>) -> Result<T>;

    /// Evaluates the gradient at a point.
    fn gradient(&self, point: &Point<T>) -> Result<Gradient<T>>;

    /// Evaluates the (symmetric) Hessian matrix at a point.
    ///
    /// # Default Implementation
    ///
    /// Returns `NotImplemented`. Override for second-order methods.
    fn hessian(&self, _point: &Point<T>) -> Result<DMatrix<T>> {
        Err(SurfaceError::not_implemented(
            "Hessian computation not implemented for this surface",
        ))
    }

    /// Number of variables the surface is defined over, if fixed.
    ///
    /// Optimizers reject initial points of any other length.
    fn dimension(&self) -> Option<usize> {
        None
    }

    /// Approximates the gradient with central differences on `value`.
    ///
    /// Intended for checking analytic gradients, not for driving an
    /// optimizer. Fails with `InvalidPoint` if any coordinate is not finite.
    fn gradient_fd(&self, point: &Point<T>) -> Result<Gradient<T>> {
        ensure_finite(point)?;
        let h0 = <T as Float>::cbrt(T::EPSILON);
        let two = <T as Scalar>::from_f64(2.0);
        let mut gradient = Gradient::zeros(point.len());

        for i in 0..point.len() {
            let h = h0 * <T as Float>::max(T::one(), <T as Float>::abs(point[i]));
            let mut forward = point.clone();
            let mut backward = point.clone();
            forward[i] += h;
            backward[i] -= h;

            gradient[i] = (self.value(&forward)? - self.value(&backward)?) / (two * h);
        }

        Ok(gradient)
    }

    /// Approximates the Hessian with central differences on `gradient`.
    ///
    /// The result is symmetrized.
    fn hessian_fd(&self, point: &Point<T>) -> Result<DMatrix<T>> {
        ensure_finite(point)?;
        let n = point.len();
        let h0 = <T as Float>::cbrt(T::EPSILON);
        let two = <T as Scalar>::from_f64(2.0);
        let mut hessian = DMatrix::zeros(n, n);

        for j in 0..n {
            let h = h0 * <T as Float>::max(T::one(), <T as Float>::abs(point[j]));
            let mut forward = point.clone();
            let mut backward = point.clone();
            forward[j] += h;
            backward[j] -= h;

            let column = (self.gradient(&forward)? - self.gradient(&backward)?) / (two * h);
            if column.len() != n {
                return Err(SurfaceError::dimension_mismatch(n, column.len()));
            }
            hessian.set_column(j, &column);
        }

        Ok((&hessian + hessian.transpose()) / two)
    }
}

fn ensure_finite<T: Scalar>(point: &Point<T>) -> Result<()> {
    match point.iter().position(|&v| !<T as Float>::is_finite(v)) {
        Some(i) => Err(SurfaceError::invalid_point(format!(
            "coordinate {i} is {} and cannot be perturbed",
            point[i]
        ))),
        None => Ok(()),
    }
}

impl<T, S> DifferentiableSurface<T> for &S
where
    T: Scalar,
    S: DifferentiableSurface<T> + ?Sized,
{
    fn value(&self, point: &Point<T>) -> Result<T> {
        (**self).value(point)
    }

    fn gradient(&self, point: &Point<T>) -> Result<Gradient<T>> {
        (**self).gradient(point)
    }

    fn hessian(&self, point: &Point<T>) -> Result<DMatrix<T>> {
        (**self).hessian(point)
    }

    fn dimension(&self) -> Option<usize> {
        (**self).dimension()
    }
}

/// Surface built from plain oracle closures.
///
/// ```
/// use curvopt_core::surface::{DifferentiableSurface, FnSurface};
/// use curvopt_core::types::DVector;
///
/// let bowl = FnSurface::new(
///     |x: &DVector<f64>| 0.5 * x.norm_squared(),
///     |x: &DVector<f64>| x.clone(),
/// );
/// let g = bowl.gradient(&DVector::from_vec(vec![1.0, -2.0])).unwrap();
/// assert_eq!(g[1], -2.0);
/// ```
pub struct FnSurface<T, F, G, H = fn(&Point<T>) -> DMatrix<T>> {
    value: F,
    gradient: G,
    hessian: Option<H>,
    dimension: Option<usize>,
    _scalar: PhantomData<fn() -> T>,
}

impl<T, F, G> FnSurface<T, F, G>
where
    T: Scalar,
    F: Fn(&Point<T>) -> T,
    G: Fn(&Point<T>) -> Gradient<T>,
{
    /// Creates a surface from value and gradient oracles.
    pub fn new(value: F, gradient: G) -> Self {
        Self {
            value,
            gradient,
            hessian: None,
            dimension: None,
            _scalar: PhantomData,
        }
    }
}

impl<T, F, G, H> FnSurface<T, F, G, H>
where
    T: Scalar,
{
    /// Attaches a Hessian oracle.
    pub fn with_hessian<H2>(self, hessian: H2) -> FnSurface<T, F, G, H2>
    where
        H2: Fn(&Point<T>) -> DMatrix<T>,
    {
        FnSurface {
            value: self.value,
            gradient: self.gradient,
            hessian: Some(hessian),
            dimension: self.dimension,
            _scalar: PhantomData,
        }
    }

    /// Declares the number of variables.
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = Some(dimension);
        self
    }

    /// Whether a Hessian oracle is attached.
    pub fn has_hessian(&self) -> bool {
        self.hessian.is_some()
    }
}

impl<T, F, G, H> Debug for FnSurface<T, F, G, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSurface")
            .field("has_hessian", &self.hessian.is_some())
            .field("dimension", &self.dimension)
            .finish_non_exhaustive()
    }
}

impl<T, F, G, H> DifferentiableSurface<T> for FnSurface<T, F, G, H>
where
    T: Scalar,
    F: Fn(&Point<T>) -> T,
    G: Fn(&Point<T>) -> Gradient<T>,
    H: Fn(&Point<T>) -> DMatrix<T>,
{
    fn value(&self, point: &Point<T>) -> Result<T> {
        Ok((self.value)(point))
    }

    fn gradient(&self, point: &Point<T>) -> Result<Gradient<T>> {
        Ok((self.gradient)(point))
    }

    fn hessian(&self, point: &Point<T>) -> Result<DMatrix<T>> {
        self.hessian
            .as_ref()
            .map(|hessian| hessian(point))
            .ok_or_else(|| SurfaceError::not_implemented("no Hessian oracle attached"))
    }

    fn dimension(&self) -> Option<usize> {
        self.dimension
    }
}

/// Quadratic surface `f(x) = ½ xᵀAx + bᵀx + c`.
///
/// With `A` symmetric positive definite this is the textbook convex test
/// problem: the minimizer is `-A⁻¹b` and the Hessian is `A` everywhere.
#[derive(Debug, Clone)]
pub struct QuadraticSurface<T>
where
    T: Scalar,
{
    /// The quadratic form matrix (should be symmetric)
    pub a: DMatrix<T>,
    /// The linear term
    pub b: Gradient<T>,
    /// The constant term
    pub c: T,
}

impl<T> QuadraticSurface<T>
where
    T: Scalar,
{
    /// Creates a new quadratic surface.
    ///
    /// # Panics
    ///
    /// Panics if `a` is not square or `b` does not match its size.
    pub fn new(a: DMatrix<T>, b: Gradient<T>, c: T) -> Self {
        assert!(a.is_square(), "quadratic form must be square");
        assert_eq!(a.nrows(), b.len(), "linear term must match the quadratic form");
        Self { a, b, c }
    }

    /// Creates `f(x) = ½‖x‖²`.
    pub fn simple(dim: usize) -> Self {
        Self {
            a: DMatrix::identity(dim, dim),
            b: Gradient::zeros(dim),
            c: T::zero(),
        }
    }

    /// Creates `f(x) = ½ Σ dᵢ xᵢ²`.
    pub fn diagonal(diagonal: &[T]) -> Self {
        let d = Gradient::from_column_slice(diagonal);
        Self {
            a: DMatrix::from_diagonal(&d),
            b: Gradient::zeros(diagonal.len()),
            c: T::zero(),
        }
    }

    fn check_point(&self, point: &Point<T>) -> Result<()> {
        if point.len() == self.b.len() {
            Ok(())
        } else {
            Err(SurfaceError::dimension_mismatch(self.b.len(), point.len()))
        }
    }
}

impl<T> DifferentiableSurface<T> for QuadraticSurface<T>
where
    T: Scalar,
{
    fn value(&self, point: &Point<T>) -> Result<T> {
        self.check_point(point)?;
        let ax = &self.a * point;
        Ok(point.dot(&ax) * <T as Scalar>::from_f64(0.5) + self.b.dot(point) + self.c)
    }

    fn gradient(&self, point: &Point<T>) -> Result<Gradient<T>> {
        self.check_point(point)?;
        Ok(&self.a * point + &self.b)
    }

    fn hessian(&self, point: &Point<T>) -> Result<DMatrix<T>> {
        self.check_point(point)?;
        Ok(self.a.clone())
    }

    fn dimension(&self) -> Option<usize> {
        Some(self.b.len())
    }
}

/// Wrapper counting oracle evaluations, for tests and diagnostics.
#[derive(Debug)]
pub struct CountingSurface<S> {
    /// The underlying surface
    pub inner: S,
    value_count: Cell<usize>,
    gradient_count: Cell<usize>,
    hessian_count: Cell<usize>,
}

impl<S> CountingSurface<S> {
    /// Creates a new counting wrapper around a surface.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            value_count: Cell::new(0),
            gradient_count: Cell::new(0),
            hessian_count: Cell::new(0),
        }
    }

    /// Resets all counters to zero.
    pub fn reset_counts(&self) {
        self.value_count.set(0);
        self.gradient_count.set(0);
        self.hessian_count.set(0);
    }

    /// Returns `(value, gradient, hessian)` evaluation counts.
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.value_count.get(),
            self.gradient_count.get(),
            self.hessian_count.get(),
        )
    }
}

impl<T, S> DifferentiableSurface<T> for CountingSurface<S>
where
    T: Scalar,
    S: DifferentiableSurface<T>,
{
    fn value(&self, point: &Point<T>) -> Result<T> {
        self.value_count.set(self.value_count.get() + 1);
        self.inner.value(point)
    }

    fn gradient(&self, point: &Point<T>) -> Result<Gradient<T>> {
        self.gradient_count.set(self.gradient_count.get() + 1);
        self.inner.gradient(point)
    }

    fn hessian(&self, point: &Point<T>) -> Result<DMatrix<T>> {
        self.hessian_count.set(self.hessian_count.get() + 1);
        self.inner.hessian(point)
    }

    fn dimension(&self) -> Option<usize> {
        self.inner.dimension()
    }
}
