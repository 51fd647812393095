//! Top-level configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ComparisonConfig, EstimationConfig, LogFormat, ObservabilityConfig, ScmConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`CED_*`)
/// 2. Config file passed to [`CedConfig::load`]
/// 3. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CedConfig {
    pub scm: ScmConfig,
    pub estimation: EstimationConfig,
    pub comparison: ComparisonConfig,
    pub observability: ObservabilityConfig,
}

impl CedConfig {
    /// Load a TOML file, apply `CED_*` overrides, and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let mut config: CedConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::apply_env_overrides(&mut config);
        config.validate()?;
        tracing::debug!(path = %path.display(), model = ?config.scm.model, "loaded config");
        Ok(config)
    }

    /// Compiled defaults plus `CED_*` overrides, validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        Self::apply_env_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string. No env overrides, no validation.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scm.n_samples == 0 {
            return Err(invalid("scm.n_samples", "must be positive"));
        }
        if !self.scm.random_factor.is_finite() || self.scm.random_factor < 0.0 {
            return Err(invalid("scm.random_factor", "must be finite and non-negative"));
        }
        if let Some((name, _)) = self
            .scm
            .coefficients
            .iter()
            .find(|(_, c)| !c.is_finite())
        {
            return Err(invalid(
                &format!("scm.coefficients.{name}"),
                "must be finite",
            ));
        }
        if !self.estimation.increment.is_finite() || self.estimation.increment == 0.0 {
            return Err(invalid("estimation.increment", "must be finite and non-zero"));
        }
        let z = self.estimation.z_threshold;
        if z.is_nan() || z <= 0.0 {
            return Err(invalid("estimation.z_threshold", "must be positive"));
        }
        if self.estimation.outcome.is_empty() {
            return Err(invalid("estimation.outcome", "must name a variable"));
        }
        if self.comparison.display_columns.is_empty() {
            return Err(invalid("comparison.display_columns", "must not be empty"));
        }
        Ok(())
    }

    /// Apply environment variable overrides.
    /// Pattern: `CED_SEED`, `CED_N_SAMPLES`, `CED_RANDOM_FACTOR`, etc.
    fn apply_env_overrides(config: &mut CedConfig) {
        if let Ok(val) = std::env::var("CED_SEED") {
            if let Ok(v) = val.parse::<u64>() {
                config.scm.seed = v;
            }
        }
        if let Ok(val) = std::env::var("CED_N_SAMPLES") {
            if let Ok(v) = val.parse::<usize>() {
                config.scm.n_samples = v;
            }
        }
        if let Ok(val) = std::env::var("CED_RANDOM_FACTOR") {
            if let Ok(v) = val.parse::<f64>() {
                config.scm.random_factor = v;
            }
        }
        if let Ok(val) = std::env::var("CED_INCREMENT") {
            if let Ok(v) = val.parse::<f64>() {
                config.estimation.increment = v;
            }
        }
        if let Ok(val) = std::env::var("CED_PARALLEL") {
            if let Ok(v) = val.parse::<bool>() {
                config.estimation.parallel = v;
            }
        }
        if let Ok(val) = std::env::var("CED_LOG_FORMAT") {
            match val.to_ascii_lowercase().as_str() {
                "json" => config.observability.log_format = LogFormat::Json,
                "text" => config.observability.log_format = LogFormat::Text,
                _ => {}
            }
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
}
