//! Step-limited Newton-Raphson method
//!
//! Each iteration evaluates the exact Hessian at the current point and moves
//! along `-H⁺g`, capped at the maximum step norm. The pseudoinverse keeps the
//! step defined at singular Hessians; near indefinite regions the direction
//! may point uphill and only the step limit bounds it.
//!
//! No curvature information is carried between iterations.

use curvopt_core::{
    error::OptimizerResult,
    numerical::pseudo_inverse,
    optimizer::{
        ConvergenceChecker, ConvergenceStatus, OptimizationResult, Optimizer, OptimizerConfig,
        RunRecorder,
    },
    step_size::StepLimiter,
    surface::DifferentiableSurface,
    types::{Point, Scalar},
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::utils::{log_iteration, log_termination};

/// Configuration for the Newton-Raphson method
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NewtonRaphsonConfig<T> {
    /// Step limit, tolerance and iteration budget
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub base: OptimizerConfig<T>,
    /// Relative singular value cutoff of the pseudoinverse
    pub pseudo_inverse_rcond: T,
}

impl<T: Scalar> Default for NewtonRaphsonConfig<T> {
    fn default() -> Self {
        Self {
            base: OptimizerConfig::default(),
            pseudo_inverse_rcond: T::PSEUDO_INVERSE_RCOND,
        }
    }
}

impl<T: Scalar> NewtonRaphsonConfig<T> {
    /// Create a new Newton-Raphson configuration with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum step norm
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

    /// Set the pseudoinverse cutoff
    pub fn with_pseudo_inverse_rcond(mut self, rcond: T) -> Self {
        self.pseudo_inverse_rcond = rcond;
        self
    }
}

/// Newton-Raphson optimizer
#[derive(Debug, Clone, Default)]
pub struct NewtonRaphson<T: Scalar> {
    config: NewtonRaphsonConfig<T>,
}

impl<T: Scalar> NewtonRaphson<T> {
    /// Create a new Newton-Raphson optimizer with the given configuration
    pub fn new(config: NewtonRaphsonConfig<T>) -> Self {
        Self { config }
    }

    /// The configuration in use
    pub fn config(&self) -> &NewtonRaphsonConfig<T> {
        &self.config
    }
}

impl<T: Scalar> Optimizer<T> for NewtonRaphson<T> {
    fn name(&self) -> &str {
        "newton-raphson"
    }

    fn optimize<S>(
        &mut self,
        surface: &S,
        initial_point: &Point<T>,
    ) -> OptimizerResult<OptimizationResult<T>>
    where
        S: DifferentiableSurface<T> + ?Sized,
    {
        let config = &self.config;
        config.base.validate()?;

        let mut run = RunRecorder::start(surface, initial_point, config.base.max_iterations)?;
        let limiter = StepLimiter::new(config.base.max_step);
        let checker = ConvergenceChecker::new(config.base.gradient_tolerance);

        let mut current = initial_point.clone();

        for iteration in 0..config.base.max_iterations {
            let gradient = run.gradient(surface, &current)?;
            let hessian = run.hessian(surface, &current)?;

            let inverse = pseudo_inverse(&hessian, config.pseudo_inverse_rcond)?;
            let mut step = -(inverse * gradient);
            limiter.limit_in_place(&mut step);

            let point = &current + &step;
            let (gradient_max_norm, converged) = checker.check(&run.gradient(surface, &point)?);
            run.record_step(point.clone(), gradient_max_norm);
            log_iteration(self.name(), iteration, gradient_max_norm, &step);

            if converged {
                let result = run.finish(ConvergenceStatus::Converged);
                log_termination(self.name(), &result);
                return Ok(result);
            }

            current = point;
        }

        let result = run.finish(ConvergenceStatus::MaxIterExceeded);
        log_termination(self.name(), &result);
        Ok(result)
    }
}

/// Runs the Newton-Raphson method from `initial_point`.
pub fn optimize_newton_raphson<T, S>(
    surface: &S,
    initial_point: &Point<T>,
    config: &NewtonRaphsonConfig<T>,
) -> OptimizerResult<OptimizationResult<T>>
where
    T: Scalar,
    S: DifferentiableSurface<T> + ?Sized,
{
    NewtonRaphson::new(*config).optimize(surface, initial_point)
}
