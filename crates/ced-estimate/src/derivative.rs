//! Interventional sampler and finite-difference derivative estimator.

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use ced_core::config::{EmptyFilterPolicy, EstimationConfig, IncrementPolicy};
use ced_core::errors::{EstimationError, EstimationResult, ScmError};
use ced_core::models::{stats, InterventionLabel, Sample, ScaleTable};
use ced_scm::{evaluate, EquationSet, Override};

use crate::outliers::filter_outliers;

/// Estimate for one intervened variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivativeEstimate {
    pub variable: String,
    /// Rounded `(mean(perturbed outcome) - mean(baseline outcome)) / increment`.
    /// `NaN` when filtering left no rows.
    pub derivative: f64,
    /// Rows surviving outlier filtering.
    pub retained_rows: usize,
    /// Filtered perturbed table, every row labelled with `variable`.
    pub perturbed: Sample,
}

/// One estimate per declared variable, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivativeReport {
    pub increment: f64,
    pub policy: IncrementPolicy,
    pub outcome: String,
    estimates: Vec<DerivativeEstimate>,
}

impl DerivativeReport {
    pub fn len(&self) -> usize {
        self.estimates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.estimates.is_empty()
    }

    pub fn estimates(&self) -> &[DerivativeEstimate] {
        &self.estimates
    }

    pub fn get(&self, variable: &str) -> Option<&DerivativeEstimate> {
        self.estimates.iter().find(|e| e.variable == variable)
    }

    pub fn derivative(&self, variable: &str) -> Option<f64> {
        self.get(variable).map(|e| e.derivative)
    }

    pub fn perturbed(&self, variable: &str) -> Option<&Sample> {
        self.get(variable).map(|e| &e.perturbed)
    }

    /// `(variable, derivative)` pairs in declaration order.
    pub fn derivatives(&self) -> Vec<(&str, f64)> {
        self.estimates
            .iter()
            .map(|e| (e.variable.as_str(), e.derivative))
            .collect()
    }

    /// Variable to derivative as a JSON object; `NaN` becomes `null`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let map: serde_json::Map<String, serde_json::Value> = self
            .estimates
            .iter()
            .map(|e| (e.variable.clone(), serde_json::Value::from(e.derivative)))
            .collect();
        serde_json::to_string_pretty(&map)
    }
}

/// Runs one do-intervention per declared variable against a fixed baseline.
///
/// The baseline, the equation set, and the scale table are only read, so
/// the per-variable loop can run on the rayon pool.
#[derive(Debug, Clone, Default)]
pub struct DerivativeEstimator {
    config: EstimationConfig,
}

impl DerivativeEstimator {
    pub fn new(config: EstimationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EstimationConfig {
        &self.config
    }

    /// Estimate the derivative of the outcome for every variable in `set`.
    ///
    /// All inputs are checked before the first intervention runs.
    pub fn estimate(
        &self,
        baseline: &Sample,
        scales: &ScaleTable,
        set: &EquationSet,
        n_samples: usize,
    ) -> EstimationResult<DerivativeReport> {
        let increment = self.config.increment;
        if !increment.is_finite() || increment == 0.0 {
            return Err(EstimationError::InvalidIncrement { increment });
        }
        if baseline.n_rows() != n_samples {
            return Err(ScmError::ShapeMismatch {
                variable: "baseline".to_string(),
                expected: n_samples,
                actual: baseline.n_rows(),
            }
            .into());
        }
        let names = set.names();
        for name in &names {
            baseline.require_column(name)?;
        }
        let outcome = baseline.require_column(&self.config.outcome)?;
        let baseline_mean = stats::mean(outcome);

        let unit = match self.config.policy {
            IncrementPolicy::ProperScale => {
                for name in &names {
                    scales.require(name)?;
                }
                let mean_scale = scales.mean().ok_or_else(|| EstimationError::MissingScale {
                    variable: self.config.outcome.clone(),
                })?;
                Some(increment / mean_scale)
            }
            IncrementPolicy::BaselineStd => None,
        };

        let run = |name: &&str| -> EstimationResult<DerivativeEstimate> {
            self.estimate_one(name, baseline, scales, set, n_samples, unit, baseline_mean)
        };
        let estimates = if self.config.parallel {
            names.par_iter().map(run).collect::<EstimationResult<Vec<_>>>()?
        } else {
            names.iter().map(run).collect::<EstimationResult<Vec<_>>>()?
        };

        info!(
            variables = estimates.len(),
            rows = n_samples,
            increment,
            policy = ?self.config.policy,
            "derivative estimation complete"
        );
        Ok(DerivativeReport {
            increment,
            policy: self.config.policy,
            outcome: self.config.outcome.clone(),
            estimates,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn estimate_one(
        &self,
        variable: &str,
        baseline: &Sample,
        scales: &ScaleTable,
        set: &EquationSet,
        n_samples: usize,
        unit: Option<f64>,
        baseline_mean: f64,
    ) -> EstimationResult<DerivativeEstimate> {
        let column = baseline.require_column(variable)?;
        let shift = match unit {
            Some(unit) => unit * scales.require(variable)?,
            None => self.config.increment * stats::std_dev(column, 1),
        };

        let intervened = set.intervene(
            variable,
            Override::Shift {
                base: column.to_vec(),
                shift,
            },
        )?;
        let perturbed = evaluate(&intervened, n_samples)?.sample;
        let filtered = filter_outliers(&perturbed, self.config.z_threshold);

        let derivative = if filtered.is_empty() {
            match self.config.empty_filter {
                EmptyFilterPolicy::Nan => {
                    warn!(variable, "outlier filter removed every row, reporting NaN");
                    f64::NAN
                }
                EmptyFilterPolicy::Error => {
                    return Err(EstimationError::AllRowsFiltered {
                        variable: variable.to_string(),
                    })
                }
            }
        } else {
            let perturbed_mean = stats::mean(filtered.require_column(&self.config.outcome)?);
            stats::round_to(
                (perturbed_mean - baseline_mean) / self.config.increment,
                self.config.decimals,
            )
        };

        debug!(
            variable,
            shift,
            retained = filtered.n_rows(),
            derivative,
            "intervention evaluated"
        );
        Ok(DerivativeEstimate {
            variable: variable.to_string(),
            derivative,
            retained_rows: filtered.n_rows(),
            perturbed: filtered.with_label(InterventionLabel::variable(variable)),
        })
    }
}

/// Estimate with default settings apart from `increment`.
pub fn estimate_derivatives(
    baseline: &Sample,
    proper_std: &ScaleTable,
    set: &EquationSet,
    n_samples: usize,
    increment: f64,
) -> EstimationResult<DerivativeReport> {
    DerivativeEstimator::new(EstimationConfig {
        increment,
        ..EstimationConfig::default()
    })
    .estimate(baseline, proper_std, set, n_samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ced_scm::StructuralEquation;

    fn ramp_set() -> EquationSet {
        let mut set = EquationSet::new(0);
        set.declare(
            StructuralEquation::new("X", &[], |ctx| {
                let n = ctx.n_samples();
                Ok((0..n).map(|i| i as f64).collect())
            })
            .with_proper_std(2.0),
        )
        .unwrap();
        set.declare(
            StructuralEquation::new("Y", &["X"], |ctx| {
                Ok(ctx.parent("X")?.iter().map(|x| 3.0 * x).collect())
            })
            .with_proper_std(2.0),
        )
        .unwrap();
        set
    }

    #[test]
    fn proper_scale_shift_is_increment_over_mean_scale() {
        let set = ramp_set();
        let eval = evaluate(&set, 10).unwrap();
        let report = estimate_derivatives(&eval.sample, &eval.scales, &set, 10, 0.5).unwrap();
        // Shift of X is (0.5 / 2) * 2 = 0.5; Y moves by 1.5; divided by 0.5.
        assert_eq!(report.derivative("X"), Some(3.0));
        assert_eq!(report.derivative("Y"), Some(1.0));
    }

    #[test]
    fn baseline_std_policy_uses_sample_std() {
        let set = ramp_set();
        let eval = evaluate(&set, 10).unwrap();
        let estimator = DerivativeEstimator::new(EstimationConfig {
            increment: 1.0,
            policy: IncrementPolicy::BaselineStd,
            ..EstimationConfig::default()
        });
        let report = estimator
            .estimate(&eval.sample, &ScaleTable::new(), &set, 10)
            .unwrap();
        let std = stats::std_dev(eval.sample.column("X").unwrap(), 1);
        let expected = stats::round_to(3.0 * std, 3);
        assert_eq!(report.derivative("X"), Some(expected));
    }

    #[test]
    fn baseline_std_policy_filters_perturbed_outliers() {
        let mut set = EquationSet::new(0);
        set.declare(StructuralEquation::new("X", &[], |ctx| {
            Ok((0..ctx.n_samples())
                .map(|i| if i == 0 { 100.0 } else { 0.0 })
                .collect())
        }))
        .unwrap();
        set.declare(StructuralEquation::new("Y", &["X"], |ctx| {
            Ok(ctx.parent("X")?.to_vec())
        }))
        .unwrap();
        let eval = evaluate(&set, 20).unwrap();
        let estimator = DerivativeEstimator::new(EstimationConfig {
            policy: IncrementPolicy::BaselineStd,
            ..EstimationConfig::default()
        });
        let report = estimator
            .estimate(&eval.sample, &ScaleTable::new(), &set, 20)
            .unwrap();
        assert_eq!(report.get("X").unwrap().retained_rows, 19);
        assert_eq!(report.get("Y").unwrap().retained_rows, 19);
    }

    #[test]
    fn report_json_maps_nan_to_null() {
        let report = DerivativeReport {
            increment: 1.0,
            policy: IncrementPolicy::ProperScale,
            outcome: "Y".into(),
            estimates: vec![DerivativeEstimate {
                variable: "I".into(),
                derivative: f64::NAN,
                retained_rows: 0,
                perturbed: Sample::with_rows(0),
            }],
        };
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert!(json["I"].is_null());
    }
}
