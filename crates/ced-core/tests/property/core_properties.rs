//! Property tests for ced-core: statistics helpers, activations, tables.

use proptest::prelude::*;

use ced_core::models::stats::{l2_norm, mean, round_to, std_dev};
use ced_core::models::{Activation, InterventionLabel, Sample};

proptest! {
    #[test]
    fn round_to_is_idempotent(x in -1e6_f64..1e6, decimals in 0_u32..6) {
        let once = round_to(x, decimals);
        prop_assert_eq!(round_to(once, decimals), once);
        prop_assert!((once - x).abs() <= 0.5 * 10f64.powi(-(decimals as i32)) + 1e-9);
    }
}

proptest! {
    #[test]
    fn std_dev_is_shift_invariant(
        values in prop::collection::vec(-1e3_f64..1e3, 2..50),
        shift in -1e3_f64..1e3,
    ) {
        let shifted: Vec<f64> = values.iter().map(|v| v + shift).collect();
        prop_assert!(std_dev(&values, 0) >= 0.0);
        prop_assert!((std_dev(&values, 1) - std_dev(&shifted, 1)).abs() < 1e-6);
        prop_assert!((mean(&shifted) - mean(&values) - shift).abs() < 1e-6);
    }
}

proptest! {
    #[test]
    fn l2_norm_bounds_every_term(terms in prop::collection::vec(-100.0_f64..100.0, 1..10)) {
        let norm = l2_norm(&terms);
        for t in &terms {
            prop_assert!(norm + 1e-12 >= t.abs());
        }
    }
}

proptest! {
    #[test]
    fn sigmoid_stays_within_factor(x in -1e4_f64..1e4, scale in 0.1_f64..50.0, factor in 0.1_f64..5.0) {
        let y = Activation::Sigmoid { factor }.apply(x, scale);
        prop_assert!((0.0..=factor).contains(&y));
    }
}

proptest! {
    #[test]
    fn concat_preserves_row_count(a in 0_usize..20, b in 0_usize..20) {
        let left = Sample::from_columns([("x", vec![1.0; a])])
            .unwrap()
            .with_label(InterventionLabel::variable("x"));
        let right = Sample::from_columns([("x", vec![2.0; b])]).unwrap();
        let joined = Sample::concat(&[&left, &right]).unwrap();
        prop_assert_eq!(joined.n_rows(), a + b);
        let observational = joined.labels().unwrap().iter().filter(|l| l.is_observational()).count();
        prop_assert_eq!(observational, b);
    }
}
