//! Utility functions for optimizers.
//!
//! Logging helpers shared by the optimizer loops.

use curvopt_core::{
    optimizer::OptimizationResult,
    types::{DVector, Scalar},
};
use tracing::debug;

/// Converts a scalar to `f64` for log fields; unrepresentable values become NaN.
pub(crate) fn log_value<T: Scalar>(value: T) -> f64 {
    value.try_to_f64().unwrap_or(f64::NAN)
}

/// Emits the per-iteration event.
pub(crate) fn log_iteration<T: Scalar>(
    optimizer: &str,
    iteration: usize,
    gradient_max_norm: T,
    step: &DVector<T>,
) {
    debug!(
        optimizer,
        iteration,
        gradient_max_norm = log_value(gradient_max_norm),
        step_norm = log_value(step.norm()),
        "iteration"
    );
}

/// Emits the end-of-run summary.
pub(crate) fn log_termination<T: Scalar>(optimizer: &str, result: &OptimizationResult<T>) {
    debug!(
        optimizer,
        status = %result.status,
        iterations = result.iterations,
        gradient_max_norm = result.gradient_max_norm.map(log_value),
        gradient_evaluations = result.gradient_evaluations,
        hessian_evaluations = result.hessian_evaluations,
        duration_us = result.duration.as_micros() as u64,
        "optimization finished"
    );
}
