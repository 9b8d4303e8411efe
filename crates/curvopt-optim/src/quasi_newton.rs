//! Step-limited quasi-Newton method with SR1 curvature updates.
//!
//! The method keeps a symmetric approximation `H` of the Hessian and moves
//! along the pseudo-Newton direction `-H⁺g`, capped at the maximum step norm.
//! After every step that does not converge, `H` is corrected with the
//! Symmetric-Rank-1 update built from the secant pair of the step.
//!
//! # Initialization
//!
//! The initial approximation is `H₀ = (‖g₀‖ / smax)·I`, so that the very
//! first step is steepest descent of length exactly `smax`.
//!
//! # Algorithm
//!
//! ```text
//! H = (‖g₀‖ / smax)·I
//! for k in 0..maxiter:
//!     dx = limit(-H⁺ g₀, smax)
//!     x  = x₀ + dx
//!     g  = ∇f(x)
//!     if ‖g‖∞ < gtol: converged
//!     H  = sr1(x, g, x₀, g₀, H)
//!     x₀, g₀ = x, g
//! ```
//!
//! Since SR1 does not force `H` to be positive definite, `-H⁺g` can be an
//! ascent direction near indefinite regions. The step limit keeps such
//! steps bounded; it is not a line search.

use curvopt_core::{
    error::OptimizerResult,
    hessian_update::{scaled_identity, SkipRule, Sr1Update},
    numerical::pseudo_inverse,
    optimizer::{
        ConvergenceChecker, ConvergenceStatus, OptimizationResult, Optimizer, OptimizerConfig,
        RunRecorder,
    },
    step_size::StepLimiter,
    surface::DifferentiableSurface,
    types::{DMatrix, Gradient, Point, Scalar},
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::utils::{log_iteration, log_termination};

/// Configuration for the quasi-Newton method.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QuasiNewtonConfig<T> {
    /// Step limit, tolerance and iteration budget
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub base: OptimizerConfig<T>,
    /// Relative singular value cutoff of the pseudoinverse
    pub pseudo_inverse_rcond: T,
    /// Safeguard against ill-conditioned SR1 updates (off by default)
    pub sr1_skip_rule: SkipRule<T>,
}

impl<T: Scalar> Default for QuasiNewtonConfig<T> {
    fn default() -> Self {
        Self {
            base: OptimizerConfig::default(),
            pseudo_inverse_rcond: T::PSEUDO_INVERSE_RCOND,
            sr1_skip_rule: SkipRule::Never,
        }
    }
}

impl<T: Scalar> QuasiNewtonConfig<T> {
    /// Create a new quasi-Newton configuration with default parameters
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

    /// Set the SR1 denominator safeguard
    pub fn with_sr1_skip_rule(mut self, rule: SkipRule<T>) -> Self {
        self.sr1_skip_rule = rule;
        self
    }
}

/// Per-run state of the quasi-Newton iteration.
#[derive(Debug)]
struct QuasiNewtonState<T: Scalar> {
    point: Point<T>,
    gradient: Gradient<T>,
    hessian: DMatrix<T>,
}

/// SR1 quasi-Newton optimizer.
#[derive(Debug, Clone, Default)]
pub struct QuasiNewton<T: Scalar> {
    config: QuasiNewtonConfig<T>,
}

impl<T: Scalar> QuasiNewton<T> {
    /// Create a new quasi-Newton optimizer with the given configuration
    pub fn new(config: QuasiNewtonConfig<T>) -> Self {
        Self { config }
    }

    /// The configuration in use
    pub fn config(&self) -> &QuasiNewtonConfig<T> {
        &self.config
    }
}

impl<T: Scalar> Optimizer<T> for QuasiNewton<T> {
    fn name(&self) -> &str {
        "quasi-newton"
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
        let updater = Sr1Update::new().with_skip_rule(config.sr1_skip_rule);

        let gradient = run.gradient(surface, initial_point)?;
        let mut state = QuasiNewtonState {
            hessian: scaled_identity(run.dimension(), &gradient, config.base.max_step),
            point: initial_point.clone(),
            gradient,
        };

        for iteration in 0..config.base.max_iterations {
            let inverse = pseudo_inverse(&state.hessian, config.pseudo_inverse_rcond)?;
            let mut step = -(inverse * &state.gradient);
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

            let outcome = updater.update_in_place(
                &point,
                &gradient,
                &state.point,
                &state.gradient,
                &mut state.hessian,
            );
            if !outcome.applied() {
                trace!(iteration, ?outcome, "SR1 update skipped");
            }

            state.point = point;
            state.gradient = gradient;
        }

        let result = run.finish(ConvergenceStatus::MaxIterExceeded);
        log_termination(self.name(), &result);
        Ok(result)
    }
}

/// Runs the quasi-Newton method from `initial_point`.
pub fn optimize_quasi_newton<T, S>(
    surface: &S,
    initial_point: &Point<T>,
    config: &QuasiNewtonConfig<T>,
) -> OptimizerResult<OptimizationResult<T>>
where
    T: Scalar,
    S: DifferentiableSurface<T> + ?Sized,
{
    QuasiNewton::new(*config).optimize(surface, initial_point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use curvopt_core::{
        error::OptimizerError,
        surface::{CountingSurface, QuadraticSurface},
        types::DVector,
    };

    #[test]
    fn test_quasi_newton_creation() {
        let config = QuasiNewtonConfig::<f64>::new()
            .with_max_step(0.5)
            .with_sr1_skip_rule(SkipRule::Relative(1e-8));
        let optimizer = QuasiNewton::new(config);
        assert_eq!(optimizer.name(), "quasi-newton");
        assert_eq!(optimizer.config().base.max_step, 0.5);
        assert_eq!(optimizer.config().sr1_skip_rule, SkipRule::Relative(1e-8));
    }

    #[test]
    fn test_first_step_has_maximum_length() {
        let surface = QuadraticSurface::diagonal(&[1.0, 10.0]);
        let x0 = DVector::from_vec(vec![2.0, 1.0]);
        let config = QuasiNewtonConfig::new().with_max_iterations(1);

        let result = optimize_quasi_newton(&surface, &x0, &config).unwrap();
        let step = &result.trajectory.points()[1] - &x0;
        assert_relative_eq!(step.norm(), 0.3, epsilon = 1e-12);

        // Steepest descent direction
        let g0 = DVector::from_vec(vec![2.0, 10.0]);
        assert_relative_eq!(step.normalize(), -g0.normalize(), epsilon = 1e-12);
    }

    #[test]
    fn test_converges_on_quadratic() {
        let a = DMatrix::from_row_slice(2, 2, &[3.0, 1.0, 1.0, 2.0]);
        let b = DVector::from_vec(vec![-1.0, 0.5]);
        let surface = QuadraticSurface::new(a.clone(), b.clone(), 0.0);
        let x0 = DVector::from_vec(vec![1.0, -1.0]);

        let config = QuasiNewtonConfig::new().with_max_step(1.0).with_gradient_tolerance(1e-10);
        let result = optimize_quasi_newton(&surface, &x0, &config).unwrap();

        assert!(result.converged());
        let x_star = a.lu().solve(&(-b)).unwrap();
        assert_relative_eq!(result.point, x_star, epsilon = 1e-9);
    }

    #[test]
    fn test_gradient_evaluation_count() {
        let surface = CountingSurface::new(QuadraticSurface::<f64>::simple(3));
        let x0 = DVector::from_vec(vec![1.0, 2.0, -1.0]);
        let config = QuasiNewtonConfig::new().with_max_iterations(5);

        let result = optimize_quasi_newton(&surface, &x0, &config).unwrap();
        let (values, gradients, hessians) = surface.counts();
        assert_eq!(values, 0);
        assert_eq!(hessians, 0);
        assert_eq!(gradients, result.iterations + 1);
        assert_eq!(result.gradient_evaluations, gradients);
    }

    #[test]
    fn test_invalid_config_is_rejected_before_oracles() {
        let surface = CountingSurface::new(QuadraticSurface::<f64>::simple(2));
        let x0 = DVector::from_vec(vec![1.0, 1.0]);
        let config = QuasiNewtonConfig::new().with_max_step(0.0);

        let err = optimize_quasi_newton(&surface, &x0, &config).unwrap_err();
        assert!(matches!(err, OptimizerError::InvalidConfiguration { .. }));
        assert_eq!(surface.counts(), (0, 0, 0));
    }
}
