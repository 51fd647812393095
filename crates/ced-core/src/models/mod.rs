//! Shared data model: tables, scale tables, activations, labels.

pub mod activation;
pub mod label;
pub mod sample;
pub mod scale_table;
pub mod stats;
pub mod variable;

pub use activation::Activation;
pub use label::InterventionLabel;
pub use sample::Sample;
pub use scale_table::ScaleTable;
pub use variable::VariableKind;
