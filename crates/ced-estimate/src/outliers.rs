//! Row-wise z-score outlier filtering.
//!
//! A row survives only if every column's `|z|` is strictly below the
//! threshold. Z-scores use the population standard deviation.

use ced_core::models::stats;
use ced_core::models::Sample;

/// `true` for each row to keep.
///
/// Columns with zero or non-finite spread never flag a row. A non-finite
/// cell in a spread column always does.
pub fn zscore_keep_mask(sample: &Sample, threshold: f64) -> Vec<bool> {
    let mut keep = vec![true; sample.n_rows()];
    for (_, column) in sample.iter_columns() {
        let mean = stats::mean(column);
        let stddev = stats::std_dev(column, 0);
        if !stddev.is_finite() || stddev <= 0.0 {
            continue;
        }
        for (k, &v) in keep.iter_mut().zip(column) {
            let z = (v - mean) / stddev;
            if z.is_nan() || z.abs() >= threshold {
                *k = false;
            }
        }
    }
    keep
}

/// Drop every row flagged by [`zscore_keep_mask`].
pub fn filter_outliers(sample: &Sample, threshold: f64) -> Sample {
    sample.filter_rows(&zscore_keep_mask(sample, threshold))
}
