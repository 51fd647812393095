//! # ced-estimate
//!
//! Finite-difference causal effect derivatives over an SCM. Each declared
//! variable is shifted by a standardized increment, the model is resampled
//! under that do-intervention, rows with 3-sigma outliers are dropped, and
//! the outcome's mean shift is reported per unit of increment.

pub mod derivative;
pub mod engine;
pub mod normalize;
pub mod outliers;

pub use derivative::{estimate_derivatives, DerivativeEstimate, DerivativeEstimator, DerivativeReport};
pub use engine::{CausalEffectEngine, EngineOutput};
pub use normalize::{assemble_comparison, MinMaxScaler};
pub use outliers::{filter_outliers, zscore_keep_mask};
