//! curvopt Surfaces - Analytic test surfaces for the curvopt optimizers.
//!
//! Every surface here implements
//! [`DifferentiableSurface`](curvopt_core::surface::DifferentiableSurface)
//! with closed-form value, gradient and Hessian oracles.

pub mod damped_saddle;
pub mod rosenbrock;
mod utils;

// Re-export main surfaces for convenience
pub use damped_saddle::DampedSaddle;
pub use rosenbrock::Rosenbrock;
