//! Example: comparing the three optimizers on the damped saddle.
//!
//! Every method starts from (0.3, 0.6) with the default settings
//! (step limit 0.3, gradient tolerance 1e-5, at most 50 iterations).
//! The example prints the number of points on each path, where it ended,
//! and the bounding box of all paths together.

use curvopt::prelude::*;

fn report(name: &str, surface: &DampedSaddle, result: &OptimizationResult<f64>) -> Result<()> {
    let x = &result.point;
    println!("{name}");
    println!("  points:      {}", result.trajectory.len());
    println!("  status:      {}", result.status);
    println!("  final point: [{:+.6e}, {:+.6e}]", x[0], x[1]);
    println!("  final value: {:+.6e}", surface.value(x)?);
    println!(
        "  evaluations: {} gradient, {} Hessian",
        result.gradient_evaluations, result.hessian_evaluations
    );

    println!("  path:");
    for (k, p) in result.trajectory.iter().enumerate() {
        println!("    {k:>3}  [{:+.6}, {:+.6}]", p[0], p[1]);
    }
    println!();

    result.warn_if_not_converged(name);
    Ok(())
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== Step-limited optimizers on the damped saddle ===\n");

    let surface = DampedSaddle::new();
    let x0 = DVector::from_vec(vec![0.3, 0.6]);

    let runs = [
        (
            "Newton-Raphson",
            optimize_newton_raphson(&surface, &x0, &NewtonRaphsonConfig::new())?,
        ),
        (
            "Quasi-Newton (SR1)",
            optimize_quasi_newton(&surface, &x0, &QuasiNewtonConfig::new())?,
        ),
        (
            "Gradient descent (Barzilai-Borwein)",
            optimize_gradient_descent(&surface, &x0, &GradientDescentConfig::new())?,
        ),
    ];

    for (name, result) in &runs {
        report(name, &surface, result)?;
    }

    // Common frame around all three paths
    let mut lower = x0.clone();
    let mut upper = x0.clone();
    for (_, result) in &runs {
        let (lo, hi) = result.trajectory.bounds();
        lower = lower.inf(&lo);
        upper = upper.sup(&hi);
    }
    println!(
        "Bounding box: x in [{:+.4}, {:+.4}], y in [{:+.4}, {:+.4}]",
        lower[0], upper[0], lower[1], upper[1]
    );

    Ok(())
}
