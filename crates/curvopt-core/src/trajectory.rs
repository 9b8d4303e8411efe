//! Append-only record of the iterates visited by an optimizer.

use crate::types::{DVector, Point, Scalar};
use num_traits::Float;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered sequence of points, initial guess first.
///
/// Points can only be appended; a run that executed `k` iterations holds
/// `k + 1` points.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawTrajectory<T>"))]
pub struct Trajectory<T: Scalar> {
    points: Vec<Point<T>>,
}

/// Unchecked wire form of [`Trajectory`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawTrajectory<T: Scalar> {
    points: Vec<Point<T>>,
}

#[cfg(feature = "serde")]
impl<T: Scalar> TryFrom<RawTrajectory<T>> for Trajectory<T> {
    type Error = String;

    fn try_from(raw: RawTrajectory<T>) -> std::result::Result<Self, Self::Error> {
        if raw.points.is_empty() {
            return Err("a trajectory needs at least its initial point".to_string());
        }
        Ok(Self { points: raw.points })
    }
}

impl<T: Scalar> Trajectory<T> {
    /// Starts a trajectory at `initial_point`.
    pub fn new(initial_point: Point<T>) -> Self {
        Self {
            points: vec![initial_point],
        }
    }

    /// Starts a trajectory with room for `capacity` points.
    pub fn with_capacity(initial_point: Point<T>, capacity: usize) -> Self {
        let mut points = Vec::with_capacity(capacity.max(1));
        points.push(initial_point);
        Self { points }
    }

    /// Appends the next iterate.
    pub fn push(&mut self, point: Point<T>) {
        self.points.push(point);
    }

    /// Number of points, at least one.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a trajectory holds at least its initial point.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of steps taken.
    pub fn steps(&self) -> usize {
        self.points.len() - 1
    }

    /// The initial point.
    pub fn first(&self) -> &Point<T> {
        &self.points[0]
    }

    /// The most recent point.
    pub fn last(&self) -> &Point<T> {
        &self.points[self.points.len() - 1]
    }

    /// Iterates over the points in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Point<T>> {
        self.points.iter()
    }

    /// The points as a slice.
    pub fn points(&self) -> &[Point<T>] {
        &self.points
    }

    /// Consumes the trajectory, returning its points.
    pub fn into_points(self) -> Vec<Point<T>> {
        self.points
    }

    /// Euclidean lengths of the individual steps.
    pub fn step_norms(&self) -> Vec<T> {
        self.points
            .windows(2)
            .map(|pair| (&pair[1] - &pair[0]).norm())
            .collect()
    }

    /// Per-coordinate `(min, max)` over all points.
    ///
    /// This is the bounding box a caller needs to lay out a grid around the
    /// path, e.g. for contour plots. A coordinate that is `NaN` anywhere on
    /// the path is `NaN` in both bounds.
    pub fn bounds(&self) -> (DVector<T>, DVector<T>) {
        let first = self.first();
        let mut lower = first.clone();
        let mut upper = first.clone();

        for point in &self.points[1..] {
            for (i, &v) in point.iter().enumerate() {
                lower[i] = nan_min(lower[i], v);
                upper[i] = nan_max(upper[i], v);
            }
        }

        (lower, upper)
    }
}

fn nan_min<T: Scalar>(a: T, b: T) -> T {
    if <T as Float>::is_nan(a) || <T as Float>::is_nan(b) {
        <T as Float>::nan()
    } else {
        <T as Float>::min(a, b)
    }
}

fn nan_max<T: Scalar>(a: T, b: T) -> T {
    if <T as Float>::is_nan(a) || <T as Float>::is_nan(b) {
        <T as Float>::nan()
    } else {
        <T as Float>::max(a, b)
    }
}

impl<'a, T: Scalar> IntoIterator for &'a Trajectory<T> {
    type Item = &'a Point<T>;
    type IntoIter = std::slice::Iter<'a, Point<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn zigzag() -> Trajectory<f64> {
        let mut trajectory = Trajectory::new(DVector::from_vec(vec![0.0, 0.0]));
        trajectory.push(DVector::from_vec(vec![3.0, -4.0]));
        trajectory.push(DVector::from_vec(vec![-1.0, 2.0]));
        trajectory
    }

    #[test]
    fn test_new_trajectory_holds_initial_point() {
        let x0 = DVector::from_vec(vec![0.3, 0.6]);
        let trajectory = Trajectory::new(x0.clone());
        assert_eq!(trajectory.len(), 1);
        assert_eq!(trajectory.steps(), 0);
        assert!(!trajectory.is_empty());
        assert_eq!(trajectory.first(), &x0);
        assert_eq!(trajectory.last(), &x0);
    }

    #[test]
    fn test_push_preserves_order() {
        let trajectory = zigzag();
        assert_eq!(trajectory.len(), 3);
        let xs: Vec<f64> = trajectory.iter().map(|p| p[0]).collect();
        assert_eq!(xs, vec![0.0, 3.0, -1.0]);
        assert_eq!(trajectory.last()[1], 2.0);
    }

    #[test]
    fn test_step_norms() {
        let norms = zigzag().step_norms();
        assert_eq!(norms.len(), 2);
        assert_relative_eq!(norms[0], 5.0);
        assert_relative_eq!(norms[1], 52.0_f64.sqrt());
    }

    #[test]
    fn test_bounds() {
        let (lower, upper) = zigzag().bounds();
        assert_eq!(lower, DVector::from_vec(vec![-1.0, -4.0]));
        assert_eq!(upper, DVector::from_vec(vec![3.0, 2.0]));
    }

    #[test]
    fn test_bounds_propagate_nan() {
        let mut trajectory = zigzag();
        trajectory.push(DVector::from_vec(vec![f64::NAN, 1.0]));
        trajectory.push(DVector::from_vec(vec![5.0, 1.0]));

        let (lower, upper) = trajectory.bounds();
        assert!(lower[0].is_nan());
        assert!(upper[0].is_nan());
        assert_eq!(lower[1], -4.0);
        assert_eq!(upper[1], 2.0);
    }

    #[test]
    fn test_into_points() {
        let points = zigzag().into_points();
        assert_eq!(points.len(), 3);
        assert_eq!(points[1][0], 3.0);
    }
}
