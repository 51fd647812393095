//! `CedErrorCode` trait for stable, machine-readable error codes.

/// Every error enum implements this to expose a structured code string
/// alongside its human-readable message.
pub trait CedErrorCode {
    /// Returns the error code string (e.g., "CYCLIC_GRAPH").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CYCLIC_GRAPH: &str = "CYCLIC_GRAPH";
pub const UNDECLARED_PARENT: &str = "UNDECLARED_PARENT";
pub const UNKNOWN_VARIABLE: &str = "UNKNOWN_VARIABLE";
pub const DUPLICATE_VARIABLE: &str = "DUPLICATE_VARIABLE";
pub const SHAPE_MISMATCH: &str = "SHAPE_MISMATCH";
pub const EMPTY_SAMPLE_COUNT: &str = "EMPTY_SAMPLE_COUNT";
pub const INVALID_NOISE: &str = "INVALID_NOISE";
pub const INVALID_INCREMENT: &str = "INVALID_INCREMENT";
pub const MISSING_SCALE: &str = "MISSING_SCALE";
pub const ALL_ROWS_FILTERED: &str = "ALL_ROWS_FILTERED";
pub const MISSING_COLUMN: &str = "MISSING_COLUMN";
pub const UNKNOWN_INTERVENTION: &str = "UNKNOWN_INTERVENTION";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
