//! curvopt - Step-limited curvature-based optimization.
//!
//! This is the umbrella crate. It re-exports
//!
//! - [`curvopt_core`]: surface trait, step limiting, SR1 update, result types
//! - [`curvopt_surfaces`]: analytic test surfaces
//! - [`curvopt_optim`]: the Newton-Raphson, quasi-Newton and gradient descent optimizers
//!
//! # Example
//!
//! ```rust
//! use curvopt::prelude::*;
//!
//! let x0 = DVector::from_vec(vec![0.3, 0.6]);
//! let result = optimize_newton_raphson(&DampedSaddle::new(), &x0, &NewtonRaphsonConfig::new())?;
//!
//! assert_eq!(result.status, ConvergenceStatus::Converged);
//! assert_eq!(result.trajectory.len(), 4);
//! # Ok::<(), OptimizerError>(())
//! ```

pub use curvopt_core;
pub use curvopt_optim;
pub use curvopt_surfaces;

pub use nalgebra;

/// Everything needed to set up and run an optimization.
pub mod prelude {
    pub use curvopt_core::prelude::*;
    pub use curvopt_optim::{
        optimize_gradient_descent, optimize_newton_raphson, optimize_quasi_newton,
        GradientDescent, GradientDescentConfig, NewtonRaphson, NewtonRaphsonConfig, QuasiNewton,
        QuasiNewtonConfig,
    };
    pub use curvopt_surfaces::{DampedSaddle, Rosenbrock};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_prelude_runs_every_optimizer() {
        let surface = DampedSaddle::new();
        let x0 = DVector::from_vec(vec![0.3, 0.6]);

        let lengths: Vec<usize> = [
            optimize_newton_raphson(&surface, &x0, &NewtonRaphsonConfig::new()),
            optimize_quasi_newton(&surface, &x0, &QuasiNewtonConfig::new()),
        ]
        .into_iter()
        .map(|result| result.unwrap().trajectory.len())
        .collect();

        assert_eq!(lengths, vec![4, 7]);
    }

    #[test]
    fn test_every_method_ends_near_the_minimum() {
        let surface = DampedSaddle::new();
        let x0 = DVector::from_vec(vec![0.3, 0.6]);
        let minimizer = surface.minimizer::<f64>();

        let newton = optimize_newton_raphson(&surface, &x0, &NewtonRaphsonConfig::new()).unwrap();
        let quasi_newton = optimize_quasi_newton(&surface, &x0, &QuasiNewtonConfig::new()).unwrap();
        let descent =
            optimize_gradient_descent(&surface, &x0, &GradientDescentConfig::new()).unwrap();

        assert_relative_eq!(newton.point, minimizer, epsilon = 1e-5);
        assert_relative_eq!(quasi_newton.point, minimizer, epsilon = 1e-5);
        assert_relative_eq!(descent.point, minimizer, epsilon = 1e-5);
    }
}
