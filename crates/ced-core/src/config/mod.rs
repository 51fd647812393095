//! Configuration system.
//! TOML-based, layered: env > config file > compiled defaults.

pub mod ced_config;
pub mod comparison_config;
pub mod estimation_config;
pub mod observability_config;
pub mod scm_config;

pub use ced_config::CedConfig;
pub use comparison_config::ComparisonConfig;
pub use estimation_config::{EmptyFilterPolicy, EstimationConfig, IncrementPolicy};
pub use observability_config::{LogFormat, ObservabilityConfig};
pub use scm_config::{ScmConfig, ScmModel};
