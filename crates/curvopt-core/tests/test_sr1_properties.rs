//! Property tests for the SR1 Hessian update.

use curvopt_core::{
    hessian_update::{sr1_update, SkipRule, Sr1Outcome, Sr1Update},
    numerical::is_symmetric,
    types::{DMatrix, DVector},
};
use proptest::prelude::*;

const DIM: usize = 3;

fn vector_strategy() -> impl Strategy<Value = DVector<f64>> {
    prop::collection::vec(-2.0..2.0_f64, DIM).prop_map(DVector::from_vec)
}

fn symmetric_strategy() -> impl Strategy<Value = DMatrix<f64>> {
    prop::collection::vec(-3.0..3.0_f64, DIM * DIM).prop_map(|entries| {
        let m = DMatrix::from_vec(DIM, DIM, entries);
        (&m + m.transpose()) * 0.5
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn test_sr1_preserves_symmetry(
        x in vector_strategy(),
        x0 in vector_strategy(),
        g in vector_strategy(),
        g0 in vector_strategy(),
        h0 in symmetric_strategy(),
    ) {
        let h = sr1_update(&x, &g, &x0, &g0, &h0);
        prop_assume!(h.iter().all(|v| v.is_finite()));
        let scale = h.amax().max(1.0);
        prop_assert!(is_symmetric(&(h / scale), 1e-10));
    }

    /// Whenever the update is applied and well conditioned, `H·dx = dg`.
    #[test]
    fn test_sr1_secant_equation(
        x in vector_strategy(),
        x0 in vector_strategy(),
        g in vector_strategy(),
        g0 in vector_strategy(),
        h0 in symmetric_strategy(),
    ) {
        let updater = Sr1Update::new().with_skip_rule(SkipRule::Relative(1e-3));
        let mut h = h0.clone();
        let outcome = updater.update_in_place(&x, &g, &x0, &g0, &mut h);

        if outcome == Sr1Outcome::Applied {
            let dx = &x - &x0;
            let dg = &g - &g0;
            let residual = (&h * &dx - &dg).norm();
            prop_assert!(residual <= 1e-6 * (1.0 + h.norm() * dx.norm()));
        } else {
            prop_assert_eq!(h, h0);
        }
    }

    #[test]
    fn test_sr1_ignores_vanishing_steps(
        x in vector_strategy(),
        g in vector_strategy(),
        g0 in vector_strategy(),
        h0 in symmetric_strategy(),
    ) {
        let h = sr1_update(&x, &g, &x, &g0, &h0);
        prop_assert_eq!(h, h0);
    }
}
