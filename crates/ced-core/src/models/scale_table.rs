//! Proper standard deviation table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{EstimationError, EstimationResult};

/// Per-variable scale used to size standardized interventions.
///
/// Filled by an observational evaluation pass and read-only afterwards.
/// Keys are kept sorted so `mean()` sums in a fixed order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaleTable {
    scales: BTreeMap<String, f64>,
}

impl ScaleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the scale of `variable`. Re-recording overwrites.
    pub fn record(&mut self, variable: impl Into<String>, scale: f64) {
        self.scales.insert(variable.into(), scale);
    }

    pub fn get(&self, variable: &str) -> Option<f64> {
        self.scales.get(variable).copied()
    }

    /// Scale of `variable`, or `MissingScale` when none was recorded.
    pub fn require(&self, variable: &str) -> EstimationResult<f64> {
        self.get(variable).ok_or_else(|| EstimationError::MissingScale {
            variable: variable.to_string(),
        })
    }

    pub fn contains(&self, variable: &str) -> bool {
        self.scales.contains_key(variable)
    }

    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }

    /// Mean over all recorded scales, `None` when empty.
    pub fn mean(&self) -> Option<f64> {
        if self.scales.is_empty() {
            return None;
        }
        Some(self.scales.values().sum::<f64>() / self.scales.len() as f64)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.scales.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ScaleTable {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (k, v) in iter {
            table.record(k, v);
        }
        table
    }
}
