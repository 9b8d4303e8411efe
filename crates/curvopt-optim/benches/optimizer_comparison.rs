//! Benchmarks comparing the three optimizers
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use curvopt_core::{
    hessian_update::sr1_update,
    numerical::pseudo_inverse,
    optimizer::Optimizer,
    surface::QuadraticSurface,
    types::{DMatrix, DVector, Scalar},
};
use curvopt_optim::{
    GradientDescent, GradientDescentConfig, NewtonRaphson, NewtonRaphsonConfig, QuasiNewton,
    QuasiNewtonConfig,
};
use curvopt_surfaces::{DampedSaddle, Rosenbrock};

fn benchmark_reference_surface(c: &mut Criterion) {
    let mut group = c.benchmark_group("damped_saddle");
    let surface = DampedSaddle::new();
    let x0 = DVector::from_vec(vec![0.3, 0.6]);

    group.bench_function("newton_raphson", |b| {
        b.iter(|| {
            NewtonRaphson::new(NewtonRaphsonConfig::<f64>::new())
                .optimize(black_box(&surface), black_box(&x0))
        });
    });

    group.bench_function("quasi_newton", |b| {
        b.iter(|| {
            QuasiNewton::new(QuasiNewtonConfig::<f64>::new())
                .optimize(black_box(&surface), black_box(&x0))
        });
    });

    group.bench_function("gradient_descent", |b| {
        b.iter(|| {
            GradientDescent::new(GradientDescentConfig::<f64>::new())
                .optimize(black_box(&surface), black_box(&x0))
        });
    });

    group.finish();
}

fn benchmark_rosenbrock(c: &mut Criterion) {
    let surface = Rosenbrock::<f64>::default();
    let x0 = DVector::from_vec(vec![-1.2, 1.0]);

    c.bench_function("rosenbrock/newton_raphson", |b| {
        b.iter(|| {
            NewtonRaphson::new(NewtonRaphsonConfig::new())
                .optimize(black_box(&surface), black_box(&x0))
        });
    });
}

fn benchmark_dimension_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadratic_scaling");

    for &dim in &[2, 10, 50] {
        let diagonal: Vec<f64> = (1..=dim).map(|i| i as f64).collect();
        let surface = QuadraticSurface::diagonal(&diagonal);
        let x0 = DVector::from_element(dim, 1.0);

        group.bench_with_input(BenchmarkId::new("newton_raphson", dim), &dim, |b, _| {
            b.iter(|| {
                NewtonRaphson::new(NewtonRaphsonConfig::new().with_max_step(1.0))
                    .optimize(black_box(&surface), black_box(&x0))
            });
        });

        group.bench_with_input(BenchmarkId::new("quasi_newton", dim), &dim, |b, _| {
            b.iter(|| {
                QuasiNewton::new(QuasiNewtonConfig::new().with_max_step(1.0))
                    .optimize(black_box(&surface), black_box(&x0))
            });
        });

        group.bench_with_input(BenchmarkId::new("gradient_descent", dim), &dim, |b, _| {
            b.iter(|| {
                GradientDescent::new(GradientDescentConfig::new().with_max_step(1.0))
                    .optimize(black_box(&surface), black_box(&x0))
            });
        });
    }

    group.finish();
}

fn benchmark_kernels(c: &mut Criterion) {
    let mut group = c.benchmark_group("kernels");

    for &dim in &[2, 10, 50] {
        let m = DMatrix::from_fn(dim, dim, |i, j| 1.0 / (1.0 + i as f64 + j as f64));
        let x0 = DVector::from_element(dim, 0.0);
        let x = DVector::from_element(dim, 0.1);
        let g0 = DVector::from_fn(dim, |i, _| i as f64);
        let g = DVector::from_fn(dim, |i, _| 1.0 - i as f64);

        group.bench_with_input(BenchmarkId::new("pseudo_inverse", dim), &m, |b, m| {
            b.iter(|| pseudo_inverse(black_box(m), f64::PSEUDO_INVERSE_RCOND));
        });

        group.bench_with_input(BenchmarkId::new("sr1_update", dim), &m, |b, m| {
            b.iter(|| sr1_update(black_box(&x), black_box(&g), &x0, &g0, black_box(m)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_reference_surface,
    benchmark_rosenbrock,
    benchmark_dimension_scaling,
    benchmark_kernels
);
criterion_main!(benches);
