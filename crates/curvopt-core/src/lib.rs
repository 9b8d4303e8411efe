//! Core traits and types for curvature-based unconstrained optimization.
//!
//! This crate provides the building blocks shared by the optimizers in
//! `curvopt-optim`: the surface interface they query, the step controls
//! they apply, the SR1 curvature update, and the result types they return.
//!
//! # Key Concepts
//!
//! - **Surfaces**: Smooth functions `f: ℝᵈ → ℝ` exposing value, gradient and
//!   optionally Hessian oracles
//! - **Step limiting**: Every proposed step is capped at a maximum Euclidean
//!   norm before it is taken
//! - **Curvature estimates**: Exact Hessians, SR1 approximations, or a scalar
//!   Barzilai-Borwein step
//! - **Trajectories**: The ordered list of iterates of a run
//!
//! # Modules
//!
//! - [`error`]: Error types for surfaces and optimizers
//! - [`hessian_update`]: Symmetric-Rank-1 Hessian approximation
//! - [`numerical`]: Pseudoinverse and norm helpers
//! - [`optimizer`]: Optimizer trait, configuration and results
//! - [`step_size`]: Step limiting and Barzilai-Borwein step lengths
//! - [`surface`]: Surface trait and generic surfaces
//! - [`trajectory`]: Iterate history
//! - [`types`]: Scalar trait, type aliases and default settings

pub mod error;
pub mod hessian_update;
pub mod numerical;
pub mod optimizer;
pub mod step_size;
pub mod surface;
pub mod trajectory;
pub mod types;

// Re-export commonly used items at the crate root
pub use error::{OptimizerError, OptimizerResult, Result, SurfaceError};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use curvopt_core::prelude::*;
///
/// let limiter = StepLimiter::<f64>::new(0.3);
/// let step = limiter.limit(&DVector::from_vec(vec![3.0, 4.0]));
/// assert!((step.norm() - 0.3_f64).abs() < 1e-12);
/// ```
pub mod prelude {
    pub use crate::error::{OptimizerError, OptimizerResult, Result, SurfaceError};
    pub use crate::hessian_update::{scaled_identity, sr1_update, SkipRule, Sr1Outcome, Sr1Update};
    pub use crate::numerical::{max_abs, pseudo_inverse};
    pub use crate::optimizer::{
        ConvergenceChecker, ConvergenceStatus, OptimizationResult, Optimizer, OptimizerConfig,
        RunRecorder,
    };
    pub use crate::step_size::{barzilai_borwein_step, enforce_max_step, StepLimiter};
    pub use crate::surface::{CountingSurface, DifferentiableSurface, FnSurface, QuadraticSurface};
    pub use crate::trajectory::Trajectory;
    pub use crate::types::{DMatrix, DVector, Gradient, Point, Scalar};
}
