//! Derivative estimation and post-processing errors.

use super::error_code::{self, CedErrorCode};
use super::ScmError;

/// Errors raised by the interventional sampler, the derivative estimator,
/// and comparison assembly.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimationError {
    #[error("increment must be finite and non-zero, got {increment}")]
    InvalidIncrement { increment: f64 },

    #[error("no proper scale recorded for '{variable}'; run the observational evaluation first")]
    MissingScale { variable: String },

    #[error("outlier filtering removed every row of the '{variable}' intervention")]
    AllRowsFiltered { variable: String },

    #[error("column '{name}' not present in sample")]
    MissingColumn { name: String },

    #[error("no perturbed sample for intervention '{name}'")]
    UnknownIntervention { name: String },

    #[error(transparent)]
    Scm(#[from] ScmError),
}

impl CedErrorCode for EstimationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidIncrement { .. } => error_code::INVALID_INCREMENT,
            Self::MissingScale { .. } => error_code::MISSING_SCALE,
            Self::AllRowsFiltered { .. } => error_code::ALL_ROWS_FILTERED,
            Self::MissingColumn { .. } => error_code::MISSING_COLUMN,
            Self::UnknownIntervention { .. } => error_code::UNKNOWN_INTERVENTION,
            Self::Scm(e) => e.error_code(),
        }
    }
}

pub type EstimationResult<T> = Result<T, EstimationError>;
