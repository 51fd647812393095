//! # ced-scm
//!
//! Structural causal model evaluator. Holds an ordered set of structural
//! equations, enforces that their parent relation is a DAG (`petgraph`),
//! evaluates them in topological order with one seeded noise stream per
//! variable, and supports do-interventions that swap one generator for a
//! fixed override.

pub mod equation;
pub mod equation_set;
pub mod evaluator;
pub mod graph;
pub mod models;
pub mod noise;

pub use equation::{EquationContext, LinearEquation, StructuralEquation};
pub use equation_set::{EquationSet, Override};
pub use evaluator::{evaluate, Evaluation};
pub use graph::CausalGraph;
pub use noise::NoiseStream;
