//! Invariants that hold for every run, whatever the starting point.

use curvopt_core::{
    error::OptimizerError,
    optimizer::{OptimizationResult, Optimizer},
    surface::DifferentiableSurface,
    types::DVector,
};
use curvopt_optim::{
    GradientDescent, GradientDescentConfig, NewtonRaphson, NewtonRaphsonConfig, QuasiNewton,
    QuasiNewtonConfig,
};
use curvopt_surfaces::DampedSaddle;
use proptest::prelude::*;

fn check_invariants(
    result: Result<OptimizationResult<f64>, OptimizerError>,
    x0: &DVector<f64>,
    max_step: f64,
    max_iterations: usize,
) -> Result<(), TestCaseError> {
    let result = match result {
        Ok(result) => result,
        // A degenerate SR1 update poisons the matrix; the pseudoinverse refuses it.
        Err(OptimizerError::NumericalError { .. }) => return Ok(()),
        Err(other) => return Err(TestCaseError::fail(other.to_string())),
    };

    prop_assert_eq!(result.trajectory.first(), x0);
    prop_assert_eq!(result.trajectory.len(), result.iterations + 1);
    prop_assert!(result.iterations <= max_iterations);
    prop_assert_eq!(&result.point, result.trajectory.last());

    for norm in result.trajectory.step_norms() {
        if norm.is_finite() {
            prop_assert!(norm <= max_step * (1.0 + 1e-12));
        }
    }

    if result.converged() {
        prop_assert!(result.gradient_max_norm.unwrap() < 1e-5);
        let g = DampedSaddle::new().gradient(&result.point).unwrap();
        prop_assert!(g.amax() < 1e-5);
    } else {
        prop_assert_eq!(result.iterations, max_iterations);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn test_run_invariants(
        x in -1.5..1.5_f64,
        y in -1.5..1.5_f64,
        max_step in 0.05..1.0_f64,
        max_iterations in 0..40_usize,
    ) {
        let surface = DampedSaddle::new();
        let x0 = DVector::from_vec(vec![x, y]);

        let newton = NewtonRaphson::new(
            NewtonRaphsonConfig::new()
                .with_max_step(max_step)
                .with_max_iterations(max_iterations),
        )
        .optimize(&surface, &x0);
        check_invariants(newton, &x0, max_step, max_iterations)?;

        let quasi_newton = QuasiNewton::new(
            QuasiNewtonConfig::new()
                .with_max_step(max_step)
                .with_max_iterations(max_iterations),
        )
        .optimize(&surface, &x0);
        check_invariants(quasi_newton, &x0, max_step, max_iterations)?;

        let gradient_descent = GradientDescent::new(
            GradientDescentConfig::new()
                .with_max_step(max_step)
                .with_max_iterations(max_iterations),
        )
        .optimize(&surface, &x0);
        check_invariants(gradient_descent, &x0, max_step, max_iterations)?;
    }
}
