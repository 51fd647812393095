//! Min-max normalization and the comparison table handed to plotting.

use serde::{Deserialize, Serialize};

use ced_core::config::ComparisonConfig;
use ced_core::errors::{EstimationError, EstimationResult};
use ced_core::models::{InterventionLabel, Sample};

use crate::derivative::DerivativeReport;
use crate::outliers::filter_outliers;

/// Per-column `[min, max]` fitted once, applied as `(x - min) / (max - min)`.
/// A zero-range column maps to 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    ranges: Vec<(String, f64, f64)>,
}

impl MinMaxScaler {
    /// Fit one range per column of `sample`. `NaN` cells are ignored.
    pub fn fit(sample: &Sample) -> Self {
        let ranges = sample
            .iter_columns()
            .map(|(name, column)| {
                let (min, max) = column.iter().fold(
                    (f64::INFINITY, f64::NEG_INFINITY),
                    |(lo, hi), &v| (lo.min(v), hi.max(v)),
                );
                (name.to_string(), min, max)
            })
            .collect();
        Self { ranges }
    }

    pub fn range(&self, name: &str) -> Option<(f64, f64)> {
        self.ranges
            .iter()
            .find(|(n, _, _)| n == name)
            .map(|&(_, min, max)| (min, max))
    }

    /// Scale every column of `sample`. Each column must have been fitted.
    pub fn transform(&self, sample: &Sample) -> EstimationResult<Sample> {
        for name in sample.names() {
            if self.range(name).is_none() {
                return Err(EstimationError::MissingColumn { name: name.clone() });
            }
        }
        Ok(sample.map_columns(|name, column| {
            let (min, max) = self.range(name).unwrap_or((0.0, 0.0));
            let span = max - min;
            column
                .iter()
                .map(|&x| if span > 0.0 { (x - min) / span } else { 0.0 })
                .collect()
        }))
    }

    pub fn fit_transform(sample: &Sample) -> EstimationResult<(Self, Sample)> {
        let scaler = Self::fit(sample);
        let scaled = scaler.transform(sample)?;
        Ok((scaler, scaled))
    }
}

/// Build the normalized comparison table.
///
/// Baseline outliers are dropped with the same z-score rule used on the
/// perturbed samples. The selected perturbed tables come first, in
/// selection order, followed by the baseline rows labelled observational.
/// Min-max parameters are fitted once over that concatenation, then the
/// table is narrowed to the display columns plus the label column.
pub fn assemble_comparison(
    baseline: &Sample,
    report: &DerivativeReport,
    config: &ComparisonConfig,
    z_threshold: f64,
) -> EstimationResult<Sample> {
    let observed = filter_outliers(baseline, z_threshold).with_label(InterventionLabel::Observational);

    let mut parts: Vec<&Sample> = Vec::with_capacity(config.selected_interventions.len() + 1);
    for name in &config.selected_interventions {
        let perturbed = report
            .perturbed(name)
            .ok_or_else(|| EstimationError::UnknownIntervention { name: name.clone() })?;
        parts.push(perturbed);
    }
    parts.push(&observed);

    let combined = Sample::concat(&parts)?;
    let (_, scaled) = MinMaxScaler::fit_transform(&combined)?;
    let table = scaled.select(&config.display_columns)?;

    tracing::debug!(
        rows = table.n_rows(),
        interventions = config.selected_interventions.len(),
        "comparison table assembled"
    );
    Ok(table)
}
