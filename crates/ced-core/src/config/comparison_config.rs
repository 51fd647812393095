use serde::{Deserialize, Serialize};

use crate::constants;

/// Which interventions and columns end up in the normalized comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Perturbed samples concatenated ahead of the baseline, in this order.
    pub selected_interventions: Vec<String>,
    /// Numeric columns kept in the output, plus the label column.
    pub display_columns: Vec<String>,
    /// Text rendered for baseline rows in exported records.
    pub observational_label: String,
    /// Whether the engine assembles the comparison table at all.
    pub enabled: bool,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            selected_interventions: constants::DEFAULT_SELECTED_INTERVENTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            display_columns: constants::DEFAULT_DISPLAY_COLUMNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            observational_label: constants::DEFAULT_OBSERVATIONAL_LABEL.to_string(),
            enabled: true,
        }
    }
}
