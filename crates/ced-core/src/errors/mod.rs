//! Error handling for the engine.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod estimation_error;
pub mod scm_error;

pub use config_error::ConfigError;
pub use error_code::CedErrorCode;
pub use estimation_error::{EstimationError, EstimationResult};
pub use scm_error::{ScmError, ScmResult};

/// Top-level error aggregating every subsystem via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum CedError {
    #[error("SCM error: {0}")]
    Scm(#[from] ScmError),

    #[error("Estimation error: {0}")]
    Estimation(#[from] EstimationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CedErrorCode for CedError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Scm(e) => e.error_code(),
            Self::Estimation(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Serialization(_) => error_code::SERIALIZATION_ERROR,
        }
    }
}

/// Convenience alias used across the workspace.
pub type CedResult<T> = Result<T, CedError>;
