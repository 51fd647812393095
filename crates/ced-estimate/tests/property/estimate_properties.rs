//! Property tests for ced-estimate: filtering and normalization invariants.

use proptest::prelude::*;

use ced_core::models::Sample;
use ced_estimate::{filter_outliers, zscore_keep_mask, MinMaxScaler};

fn sample_strategy() -> impl Strategy<Value = Sample> {
    (1_usize..40).prop_flat_map(|rows| {
        prop::collection::vec(prop::collection::vec(-1e3_f64..1e3, rows), 1..5).prop_map(
            |columns| {
                Sample::from_columns(
                    columns
                        .into_iter()
                        .enumerate()
                        .map(|(i, c)| (format!("c{i}"), c)),
                )
                .unwrap()
            },
        )
    })
}

proptest! {
    #[test]
    fn filtered_rows_are_a_subset(sample in sample_strategy(), threshold in 0.5_f64..4.0) {
        let mask = zscore_keep_mask(&sample, threshold);
        let filtered = filter_outliers(&sample, threshold);
        prop_assert_eq!(filtered.n_rows(), mask.iter().filter(|&&k| k).count());
        prop_assert_eq!(filtered.names(), sample.names());
        let mut kept = 0;
        for (i, &k) in mask.iter().enumerate() {
            if k {
                prop_assert_eq!(filtered.row(kept), sample.row(i));
                kept += 1;
            }
        }
    }
}

proptest! {
    #[test]
    fn wider_threshold_never_keeps_fewer(sample in sample_strategy(), t in 0.5_f64..3.0) {
        let narrow = filter_outliers(&sample, t).n_rows();
        let wide = filter_outliers(&sample, t + 1.0).n_rows();
        prop_assert!(wide >= narrow);
    }
}

proptest! {
    #[test]
    fn min_max_output_is_in_unit_interval(sample in sample_strategy()) {
        let (_, scaled) = MinMaxScaler::fit_transform(&sample).unwrap();
        for (_, column) in scaled.iter_columns() {
            for &v in column {
                prop_assert!((0.0..=1.0).contains(&v), "{} outside [0, 1]", v);
            }
        }
    }
}
