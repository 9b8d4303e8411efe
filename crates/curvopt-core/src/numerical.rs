//! Numerical helpers shared by the optimizers.

use crate::{
    error::{OptimizerError, OptimizerResult},
    types::{DMatrix, DVector, Scalar},
};
use num_traits::Float;

/// Iteration cap handed to nalgebra's SVD before it is declared failed.
const SVD_MAX_ITERATIONS: usize = 1000;

/// Moore-Penrose pseudoinverse computed from a singular value decomposition.
///
/// Singular values `σᵢ ≤ rcond · σ_max` are treated as zero, so singular and
/// badly conditioned matrices still produce a finite result. Matrices with
/// non-finite entries make the SVD fail and yield a `NumericalError`.
pub fn pseudo_inverse<T: Scalar>(matrix: &DMatrix<T>, rcond: T) -> OptimizerResult<DMatrix<T>> {
    if matrix.iter().any(|v| !<T as Float>::is_finite(*v)) {
        return Err(OptimizerError::numerical_error(
            "pseudoinverse of a matrix with non-finite entries",
        ));
    }
    if matrix.is_empty() {
        return Ok(DMatrix::zeros(matrix.ncols(), matrix.nrows()));
    }

    let svd = matrix
        .clone()
        .try_svd(true, true, T::EPSILON, SVD_MAX_ITERATIONS)
        .ok_or_else(|| OptimizerError::numerical_error("SVD did not converge"))?;

    let u = svd
        .u
        .ok_or_else(|| OptimizerError::numerical_error("SVD failed to compute U"))?;
    let v_t = svd
        .v_t
        .ok_or_else(|| OptimizerError::numerical_error("SVD failed to compute V^T"))?;

    let sigma_max = svd
        .singular_values
        .iter()
        .fold(T::zero(), |acc, &s| <T as Float>::max(acc, s));
    let cutoff = rcond * sigma_max;

    let mut inv_s = DMatrix::zeros(v_t.nrows(), u.ncols());
    for (i, &s) in svd.singular_values.iter().enumerate() {
        if s > cutoff {
            inv_s[(i, i)] = T::one() / s;
        }
    }

    Ok(v_t.transpose() * inv_s * u.transpose())
}

/// Maximum absolute component of a vector (L∞ norm).
///
/// A NaN component makes the result NaN, so a poisoned gradient can never
/// satisfy a tolerance test. The empty vector has norm zero.
pub fn max_abs<T: Scalar>(vector: &DVector<T>) -> T {
    vector.iter().fold(T::zero(), |acc, &v| {
        let a = <T as Float>::abs(v);
        if <T as Float>::is_nan(acc) || <T as Float>::is_nan(a) {
            <T as Float>::nan()
        } else if a > acc {
            a
        } else {
            acc
        }
    })
}

/// Whether `matrix` is square and equal to its transpose within `tolerance`.
pub fn is_symmetric<T: Scalar>(matrix: &DMatrix<T>, tolerance: T) -> bool {
    matrix.is_square()
        && approx::relative_eq!(*matrix, matrix.transpose(), epsilon = tolerance)
}
