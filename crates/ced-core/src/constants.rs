//! Shared constants for the causal effect derivative engine.

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Base seed; variable `i` in declaration order draws from `seed + i`.
pub const DEFAULT_SEED: u64 = 3;

/// Rows per evaluation pass.
pub const DEFAULT_N_SAMPLES: usize = 1000;

/// Random factor for the German-credit calibration.
pub const DEFAULT_RANDOM_FACTOR: f64 = 0.3;

/// Random factor for the Karimi calibration.
pub const DEFAULT_KARIMI_RANDOM_FACTOR: f64 = 1.0;

/// Finite-difference increment.
pub const DEFAULT_INCREMENT: f64 = 1.2;

/// Rows with any `|z| >= threshold` are dropped.
pub const DEFAULT_Z_THRESHOLD: f64 = 3.0;

/// Decimal places kept on a derivative estimate.
pub const DEFAULT_DECIMALS: u32 = 3;

/// Outcome column read by the estimator.
pub const DEFAULT_OUTCOME: &str = "Y";

/// Name of the label column attached to perturbed and comparison tables.
pub const INTERVENTION_COLUMN: &str = "Intervention";

/// Rendering of the observational label in exported tables.
pub const DEFAULT_OBSERVATIONAL_LABEL: &str = "O";

/// Default log filter when `CED_LOG` is absent or invalid.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable read by `init_tracing`.
pub const LOG_ENV_VAR: &str = "CED_LOG";

/// Variables of the credit SCMs, in declaration order.
pub const CREDIT_VARIABLES: [&str; 9] = ["G", "A", "E", "J", "L", "D", "I", "S", "Y"];

/// Interventions shown in the comparison table by default.
pub const DEFAULT_SELECTED_INTERVENTIONS: [&str; 2] = ["I", "E"];

/// Columns kept in the comparison table by default.
pub const DEFAULT_DISPLAY_COLUMNS: [&str; 5] = ["A", "E", "I", "L", "Y"];
