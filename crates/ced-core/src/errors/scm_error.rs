//! Structural causal model errors: graph shape, declarations, evaluation.

use super::error_code::{self, CedErrorCode};

/// Errors raised while declaring, intervening on, or evaluating an SCM.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScmError {
    #[error("cycle detected in causal graph: {cycle}")]
    CyclicGraph { cycle: String },

    #[error("variable '{variable}' references undeclared parent '{parent}'")]
    UndeclaredParent { variable: String, parent: String },

    #[error("unknown variable '{name}'")]
    UnknownVariable { name: String },

    #[error("variable '{name}' declared more than once")]
    DuplicateVariable { name: String },

    #[error("column '{variable}' has {actual} rows, expected {expected}")]
    ShapeMismatch {
        variable: String,
        expected: usize,
        actual: usize,
    },

    #[error("sample count must be positive")]
    EmptySampleCount,

    #[error("invalid noise for '{variable}': {reason}")]
    InvalidNoise { variable: String, reason: String },
}

impl CedErrorCode for ScmError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::CyclicGraph { .. } => error_code::CYCLIC_GRAPH,
            Self::UndeclaredParent { .. } => error_code::UNDECLARED_PARENT,
            Self::UnknownVariable { .. } => error_code::UNKNOWN_VARIABLE,
            Self::DuplicateVariable { .. } => error_code::DUPLICATE_VARIABLE,
            Self::ShapeMismatch { .. } => error_code::SHAPE_MISMATCH,
            Self::EmptySampleCount => error_code::EMPTY_SAMPLE_COUNT,
            Self::InvalidNoise { .. } => error_code::INVALID_NOISE,
        }
    }
}

pub type ScmResult<T> = Result<T, ScmError>;
