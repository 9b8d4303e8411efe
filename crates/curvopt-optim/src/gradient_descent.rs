//! Gradient descent with Barzilai-Borwein step lengths.
//!
//! The method moves along the unit steepest-descent direction `-g/‖g‖` with a
//! scalar step length `s`. The first step uses `s = smax`; afterwards `s` is
//! refreshed from the secant pair of the previous step,
//!
//! ```text
//! s = (dx·dg)·‖g₀‖ / (dg·dg)
//! ```
//!
//! which is the classical Barzilai-Borwein step rescaled for a unit
//! direction. Every step is still capped at `smax`.
//!
//! The scalar step is not guarded: a vanishing `dg` or a zero gradient at
//! the current point yields `inf`/`NaN`, which then flows into the iterates
//! and the run ends with [`ConvergenceStatus::MaxIterExceeded`].

use curvopt_core::{
    error::OptimizerResult,
    optimizer::{
        ConvergenceChecker, ConvergenceStatus, OptimizationResult, Optimizer, OptimizerConfig,
        RunRecorder,
    },
    step_size::{barzilai_borwein_step, is_descent_step, StepLimiter},
    surface::DifferentiableSurface,
    types::{Gradient, Point, Scalar},
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::utils::{log_iteration, log_termination, log_value};

/// Configuration for Barzilai-Borwein gradient descent.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GradientDescentConfig<T> {
    /// Step limit, tolerance and iteration budget
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub base: OptimizerConfig<T>,
}

impl<T: Scalar> Default for GradientDescentConfig<T> {
    fn default() -> Self {
        Self {
            base: OptimizerConfig::default(),
        }
    }
}

impl<T: Scalar> GradientDescentConfig<T> {
    /// Create a new configuration with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum step norm, which is also the first step length
    pub fn with_max_step(mut self, max_step: T) -> Self {
        self.base = self.base.with_max_step(max_step);
        self
    }

    /// Set the gradient L∞ tolerance
    pub fn with_gradient_tolerance(mut self, tol: T) -> Self {
        self.base = self.base.with_gradient_tolerance(tol);
        self
    }

    /// Set the iteration budget
    pub fn with_max_iterations(mut self, max_iter: usize) -> Self {
        self.base = self.base.with_max_iterations(max_iter);
        self
    }
}

/// Per-run state of the gradient descent iteration.
#[derive(Debug)]
struct GradientDescentState<T: Scalar> {
    point: Point<T>,
    gradient: Gradient<T>,
    step_length: T,
}

/// Barzilai-Borwein gradient descent optimizer.
#[derive(Debug, Clone, Default)]
pub struct GradientDescent<T: Scalar> {
    config: GradientDescentConfig<T>,
}

impl<T: Scalar> GradientDescent<T> {
    /// Create a new gradient descent optimizer with the given configuration
    pub fn new(config: GradientDescentConfig<T>) -> Self {
        Self { config }
    }

    /// The configuration in use
    pub fn config(&self) -> &GradientDescentConfig<T> {
        &self.config
    }
}

impl<T: Scalar> Optimizer<T> for GradientDescent<T> {
    fn name(&self) -> &str {
        "gradient-descent"
    }

    fn optimize<S>(
        &mut self,
        surface: &S,
        initial_point: &Point<T>,
    ) -> OptimizerResult<OptimizationResult<T>>
    where
        S: DifferentiableSurface<T> + ?Sized,
    {
        let config = &self.config.base;
        config.validate()?;

        let mut run = RunRecorder::start(surface, initial_point, config.max_iterations)?;
        let limiter = StepLimiter::new(config.max_step);
        let checker = ConvergenceChecker::new(config.gradient_tolerance);

        let mut state = GradientDescentState {
            gradient: run.gradient(surface, initial_point)?,
            point: initial_point.clone(),
            step_length: config.max_step,
        };

        for iteration in 0..config.max_iterations {
            let gradient_norm = state.gradient.norm();
            let s = state.step_length;
            let mut step = state.gradient.map(|v| -s * v / gradient_norm);
            limiter.limit_in_place(&mut step);

            let point = &state.point + &step;
            let gradient = run.gradient(surface, &point)?;
            let (gradient_max_norm, converged) = checker.check(&gradient);
            run.record_step(point.clone(), gradient_max_norm);
            log_iteration(self.name(), iteration, gradient_max_norm, &step);

            if converged {
                let result = run.finish(ConvergenceStatus::Converged);
                log_termination(self.name(), &result);
                return Ok(result);
            }

            let gradient_change = &gradient - &state.gradient;
            state.step_length = barzilai_borwein_step(&step, &gradient_change, gradient_norm);
            if !is_descent_step(state.step_length) {
                trace!(
                    iteration,
                    step_length = log_value(state.step_length),
                    "Barzilai-Borwein step is not a descent step"
                );
            }

            state.point = point;
            state.gradient = gradient;
        }

        let result = run.finish(ConvergenceStatus::MaxIterExceeded);
        log_termination(self.name(), &result);
        Ok(result)
    }
}

/// Runs Barzilai-Borwein gradient descent from `initial_point`.
pub fn optimize_gradient_descent<T, S>(
    surface: &S,
    initial_point: &Point<T>,
    config: &GradientDescentConfig<T>,
) -> OptimizerResult<OptimizationResult<T>>
where
    T: Scalar,
    S: DifferentiableSurface<T> + ?Sized,
{
    GradientDescent::new(*config).optimize(surface, initial_point)
}
