//! Row labels for the `Intervention` column.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_OBSERVATIONAL_LABEL;

/// Where a row came from: the observational baseline or a do-intervention
/// on a named variable.
///
/// `Observational` is a distinct variant, so it never collides with a
/// variable name even when both render to the same text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionLabel {
    Observational,
    Variable(String),
}

impl InterventionLabel {
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    pub fn is_observational(&self) -> bool {
        matches!(self, Self::Observational)
    }

    /// Text used in exported tables, with `observational` as the sentinel.
    pub fn render<'a>(&'a self, observational: &'a str) -> &'a str {
        match self {
            Self::Observational => observational,
            Self::Variable(name) => name,
        }
    }
}

impl fmt::Display for InterventionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.render(DEFAULT_OBSERVATIONAL_LABEL))
    }
}
