//! Helpers shared by the planar surfaces.

use curvopt_core::{
    error::{Result, SurfaceError},
    types::{Point, Scalar},
};

/// Splits a point of a two-variable surface into `(x, y)`.
pub(crate) fn planar<T: Scalar>(point: &Point<T>) -> Result<(T, T)> {
    if point.len() != 2 {
        return Err(SurfaceError::dimension_mismatch(2, point.len()));
    }
    Ok((point[0], point[1]))
}
