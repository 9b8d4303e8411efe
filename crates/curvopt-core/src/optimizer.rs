//! Core optimizer traits and types.
//!
//! Every optimizer in this workspace follows the same iteration contract:
//!
//! 1. **Direction**: compute a descent direction from the current gradient
//!    and curvature estimate.
//! 2. **Limit**: cap the step at the maximum norm `smax`.
//! 3. **Advance**: move to the new point and append it to the trajectory.
//! 4. **Check**: evaluate the new gradient; the run has converged when its
//!    L∞ norm is strictly below `gtol`.
//! 5. **Update**: otherwise refresh the curvature estimate and repeat.
//!
//! Convergence is only ever tested after a step, so the initial point is
//! never accepted as-is. A run that uses up its `maxiter` budget is not an
//! error: the result carries [`ConvergenceStatus::MaxIterExceeded`] together
//! with the last point and the full trajectory, and the caller decides
//! whether to report it (see [`OptimizationResult::warn_if_not_converged`]).
//!
//! # State machine
//!
//! ```text
//!            ┌──── ‖g‖∞ ≥ gtol, k < maxiter ────┐
//!            ▼                                   │
//!        Running ──── ‖g‖∞ < gtol ────▶ Converged
//!            │
//!            └──── k = maxiter ───────▶ MaxIterExceeded
//! ```

use crate::{
    error::{OptimizerError, OptimizerResult},
    numerical::max_abs,
    surface::DifferentiableSurface,
    trajectory::Trajectory,
    types::{DMatrix, Gradient, Point, Scalar, DEFAULT_MAX_ITERATIONS},
};
use num_traits::Float;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::time::Duration;

/// Terminal status of an optimization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConvergenceStatus {
    /// The gradient L∞ norm fell strictly below the tolerance.
    Converged,
    /// The iteration budget ran out first.
    MaxIterExceeded,
}

impl fmt::Display for ConvergenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Converged => write!(f, "converged"),
            Self::MaxIterExceeded => write!(f, "maximum iterations reached"),
        }
    }
}

/// Settings shared by all optimizers.
///
/// | field | meaning | default |
/// |---|---|---|
/// | `max_step` | maximum Euclidean norm of one step (`smax`) | 0.3 |
/// | `gradient_tolerance` | L∞ gradient tolerance (`gtol`) | 1e-5 |
/// | `max_iterations` | iteration budget (`maxiter`) | 50 |
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptimizerConfig<T> {
    /// Maximum Euclidean norm of a single step
    pub max_step: T,
    /// Convergence threshold on the gradient L∞ norm
    pub gradient_tolerance: T,
    /// Maximum number of iterations
    pub max_iterations: usize,
}

impl<T: Scalar> Default for OptimizerConfig<T> {
    fn default() -> Self {
        Self {
            max_step: T::DEFAULT_MAX_STEP,
            gradient_tolerance: T::DEFAULT_GRADIENT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl<T: Scalar> OptimizerConfig<T> {
    /// Creates a configuration with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum step norm.
    pub fn with_max_step(mut self, max_step: T) -> Self {
        self.max_step = max_step;
        self
    }

    /// Sets the gradient tolerance.
    pub fn with_gradient_tolerance(mut self, tol: T) -> Self {
        self.gradient_tolerance = tol;
        self
    }

    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, max_iter: usize) -> Self {
        self.max_iterations = max_iter;
        self
    }

    /// Checks the settings.
    ///
    /// `max_step` must be finite and positive, `gradient_tolerance` must be
    /// non-negative (zero disables convergence).
    pub fn validate(&self) -> OptimizerResult<()> {
        if !<T as Float>::is_finite(self.max_step) || self.max_step <= T::zero() {
            return Err(OptimizerError::invalid_configuration(
                "must be finite and positive",
                "max_step",
                self.max_step.to_string(),
            ));
        }
        if <T as Float>::is_nan(self.gradient_tolerance) || self.gradient_tolerance < T::zero() {
            return Err(OptimizerError::invalid_configuration(
                "must be non-negative",
                "gradient_tolerance",
                self.gradient_tolerance.to_string(),
            ));
        }
        Ok(())
    }
}

/// Outcome of an optimization run.
#[derive(Debug, Clone)]
pub struct OptimizationResult<T>
where
    T: Scalar,
{
    /// The last point reached
    pub point: Point<T>,

    /// Every iterate, initial point first
    pub trajectory: Trajectory<T>,

    /// Why the run stopped
    pub status: ConvergenceStatus,

    /// Number of iterations performed
    pub iterations: usize,

    /// L∞ norm of the gradient at `point`; `None` if no step was taken
    pub gradient_max_norm: Option<T>,

    /// Number of gradient oracle calls
    pub gradient_evaluations: usize,

    /// Number of Hessian oracle calls
    pub hessian_evaluations: usize,

    /// Total optimization time
    pub duration: Duration,
}

impl<T> OptimizationResult<T>
where
    T: Scalar,
{
    /// Creates a result whose final point is the last trajectory point.
    pub fn new(trajectory: Trajectory<T>, status: ConvergenceStatus, duration: Duration) -> Self {
        Self {
            point: trajectory.last().clone(),
            iterations: trajectory.steps(),
            trajectory,
            status,
            gradient_max_norm: None,
            gradient_evaluations: 0,
            hessian_evaluations: 0,
            duration,
        }
    }

    /// Sets the gradient L∞ norm at the final point.
    pub fn with_gradient_max_norm(mut self, norm: Option<T>) -> Self {
        self.gradient_max_norm = norm;
        self
    }

    /// Sets the oracle call counts.
    pub fn with_evaluations(mut self, gradient: usize, hessian: usize) -> Self {
        self.gradient_evaluations = gradient;
        self.hessian_evaluations = hessian;
        self
    }

    /// Whether the run converged.
    pub fn converged(&self) -> bool {
        self.status == ConvergenceStatus::Converged
    }

    /// Splits the result into `(final_point, trajectory)`.
    pub fn into_parts(self) -> (Point<T>, Trajectory<T>) {
        (self.point, self.trajectory)
    }

    /// Emits a single warning event when the run did not converge.
    ///
    /// Returns `true` if a warning was emitted.
    pub fn warn_if_not_converged(&self, optimizer: &str) -> bool {
        if self.converged() {
            return false;
        }
        tracing::warn!(
            optimizer,
            iterations = self.iterations,
            gradient_max_norm = self.gradient_max_norm.and_then(Scalar::try_to_f64),
            "did not converge"
        );
        true
    }
}

/// Convergence test shared by all optimizers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceChecker<T> {
    gradient_tolerance: T,
}

impl<T: Scalar> ConvergenceChecker<T> {
    /// Creates a checker for the given L∞ gradient tolerance.
    pub fn new(gradient_tolerance: T) -> Self {
        Self { gradient_tolerance }
    }

    /// Returns the gradient L∞ norm and whether it is strictly below the
    /// tolerance. A NaN norm never converges.
    pub fn check(&self, gradient: &Gradient<T>) -> (T, bool) {
        let norm = max_abs(gradient);
        (norm, norm < self.gradient_tolerance)
    }
}

/// Per-run bookkeeping shared by the optimizers: trajectory, oracle call
/// counts and the gradient shape checks.
#[derive(Debug)]
pub struct RunRecorder<T: Scalar> {
    dimension: usize,
    trajectory: Trajectory<T>,
    gradient_evaluations: usize,
    hessian_evaluations: usize,
    last_gradient_max_norm: Option<T>,
    started: std::time::Instant,
}

impl<T: Scalar> RunRecorder<T> {
    /// Validates the initial point against the surface and starts a run.
    pub fn start<S>(surface: &S, initial_point: &Point<T>, max_iterations: usize) -> OptimizerResult<Self>
    where
        S: DifferentiableSurface<T> + ?Sized,
    {
        if initial_point.is_empty() {
            return Err(OptimizerError::invalid_initial_point(
                "initial point has no coordinates",
            ));
        }
        if let Some(expected) = surface.dimension() {
            if expected != initial_point.len() {
                return Err(OptimizerError::dimension_mismatch(
                    "initial point",
                    expected,
                    initial_point.len(),
                ));
            }
        }

        Ok(Self {
            dimension: initial_point.len(),
            trajectory: Trajectory::with_capacity(
                initial_point.clone(),
                max_iterations.saturating_add(1).min(1024),
            ),
            gradient_evaluations: 0,
            hessian_evaluations: 0,
            last_gradient_max_norm: None,
            started: std::time::Instant::now(),
        })
    }

    /// Dimension of the search space.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Evaluates and shape-checks the gradient.
    pub fn gradient<S>(&mut self, surface: &S, point: &Point<T>) -> OptimizerResult<Gradient<T>>
    where
        S: DifferentiableSurface<T> + ?Sized,
    {
        self.gradient_evaluations += 1;
        let gradient = surface.gradient(point)?;
        if gradient.len() != self.dimension {
            return Err(OptimizerError::dimension_mismatch(
                "gradient",
                self.dimension,
                gradient.len(),
            ));
        }
        Ok(gradient)
    }

    /// Evaluates and shape-checks the Hessian.
    pub fn hessian<S>(&mut self, surface: &S, point: &Point<T>) -> OptimizerResult<DMatrix<T>>
    where
        S: DifferentiableSurface<T> + ?Sized,
    {
        self.hessian_evaluations += 1;
        let hessian = surface.hessian(point)?;
        if hessian.shape() != (self.dimension, self.dimension) {
            return Err(OptimizerError::dimension_mismatch(
                "Hessian",
                format!("{0}x{0}", self.dimension),
                format!("{}x{}", hessian.nrows(), hessian.ncols()),
            ));
        }
        Ok(hessian)
    }

    /// Appends an iterate and records the gradient norm found there.
    pub fn record_step(&mut self, point: Point<T>, gradient_max_norm: T) {
        self.trajectory.push(point);
        self.last_gradient_max_norm = Some(gradient_max_norm);
    }

    /// Number of steps recorded so far.
    pub fn iterations(&self) -> usize {
        self.trajectory.steps()
    }

    /// Finishes the run.
    pub fn finish(self, status: ConvergenceStatus) -> OptimizationResult<T> {
        OptimizationResult::new(self.trajectory, status, self.started.elapsed())
            .with_gradient_max_norm(self.last_gradient_max_norm)
            .with_evaluations(self.gradient_evaluations, self.hessian_evaluations)
    }
}

/// Interface implemented by every optimizer.
///
/// Implementations own their configuration only; all per-run state lives in
/// [`optimize`](Self::optimize), so one optimizer value can serve many
/// independent runs.
pub trait Optimizer<T>: Debug
where
    T: Scalar,
{
    /// Human-readable name, used in log events.
    fn name(&self) -> &str;

    /// Minimizes `surface` starting from `initial_point`.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid configuration or initial point, for
    /// oracle failures or wrongly shaped oracle output, and for SVD failures
    /// on non-finite matrices. Non-convergence is not an error.
    fn optimize<S>(
        &mut self,
        surface: &S,
        initial_point: &Point<T>,
    ) -> OptimizerResult<OptimizationResult<T>>
    where
        S: DifferentiableSurface<T> + ?Sized;
}
