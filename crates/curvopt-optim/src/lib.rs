//! curvopt Optimization - Step-limited curvature-based optimizers.
//!
//! This crate provides three unconstrained minimizers that share the same
//! iteration contract (see [`curvopt_core::optimizer`]):
//!
//! # Available Optimizers
//!
//! - **Newton-Raphson**: exact Hessian, pseudo-inverted at every iteration
//! - **Quasi-Newton**: SR1 Hessian approximation started from a scaled identity
//! - **Gradient descent**: unit steepest descent with Barzilai-Borwein step lengths
//!
//! Every step is capped at a maximum Euclidean norm; there is no line search.
//!
//! # Examples
//!
//! ```rust
//! use curvopt_core::{optimizer::Optimizer, surface::QuadraticSurface, types::DVector};
//! use curvopt_optim::{QuasiNewton, QuasiNewtonConfig};
//!
//! let surface = QuadraticSurface::<f64>::diagonal(&[1.0, 4.0]);
//! let mut optimizer = QuasiNewton::new(
//!     QuasiNewtonConfig::new()
//!         .with_max_step(0.5)
//!         .with_gradient_tolerance(1e-8),
//! );
//!
//! let result = optimizer
//!     .optimize(&surface, &DVector::from_vec(vec![1.0, 1.0]))
//!     .unwrap();
//! assert!(result.converged());
//! ```

pub mod gradient_descent;
pub mod newton;
pub mod quasi_newton;
mod utils;

// Re-export main optimizers for convenience
pub use gradient_descent::{optimize_gradient_descent, GradientDescent, GradientDescentConfig};
pub use newton::{optimize_newton_raphson, NewtonRaphson, NewtonRaphsonConfig};
pub use quasi_newton::{optimize_quasi_newton, QuasiNewton, QuasiNewtonConfig};

// Re-export commonly used items from core
pub use curvopt_core::{
    hessian_update::SkipRule,
    optimizer::{ConvergenceStatus, OptimizationResult, Optimizer, OptimizerConfig},
};
