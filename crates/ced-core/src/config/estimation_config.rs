//! Derivative estimation configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// How an intervention's shift is sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IncrementPolicy {
    /// `baseline + (increment / mean(proper_std)) * proper_std[v]`.
    #[default]
    ProperScale,
    /// `baseline + increment * std(baseline v)` with `ddof = 1`.
    ///
    /// Perturbed rows are still z-score filtered before the outcome mean is
    /// taken, same as under `ProperScale`. Older Karimi-calibrated runs
    /// skipped that filter, so results can differ slightly from theirs.
    BaselineStd,
}

/// What to report when outlier filtering leaves no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmptyFilterPolicy {
    /// Report `NaN` for that variable and keep going.
    #[default]
    Nan,
    /// Fail with `AllRowsFiltered`.
    Error,
}

/// Configuration for the interventional sampler and derivative estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimationConfig {
    pub increment: f64,
    pub policy: IncrementPolicy,
    /// Rows with any `|z|` at or above this are dropped.
    pub z_threshold: f64,
    pub empty_filter: EmptyFilterPolicy,
    /// Outcome column whose mean shift is measured.
    pub outcome: String,
    /// Decimal places kept on each estimate.
    pub decimals: u32,
    /// Run the per-variable loop on the rayon pool.
    pub parallel: bool,
}

impl Default for EstimationConfig {
    fn default() -> Self {
        Self {
            increment: constants::DEFAULT_INCREMENT,
            policy: IncrementPolicy::default(),
            z_threshold: constants::DEFAULT_Z_THRESHOLD,
            empty_filter: EmptyFilterPolicy::default(),
            outcome: constants::DEFAULT_OUTCOME.to_string(),
            decimals: constants::DEFAULT_DECIMALS,
            parallel: false,
        }
    }
}
