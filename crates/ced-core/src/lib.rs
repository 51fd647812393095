//! # ced-core
//!
//! Foundation crate for the causal effect derivative engine.
//! Defines the shared table model, errors, config, tracing, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod tracing;

// Re-export the most commonly used types at the crate root.
pub use config::CedConfig;
pub use errors::{CedError, CedResult};
pub use models::{Activation, InterventionLabel, Sample, ScaleTable, VariableKind};
