//! Built-in credit-scoring SCMs.
//!
//! Both models declare `G, A, E, J, L, D, I, S, Y` in that order and share
//! the same parent structure; they differ in calibration.

mod german_credit;
mod karimi;

pub use german_credit::german_credit;
pub use karimi::karimi_credit;

use ced_core::config::{ScmConfig, ScmModel};
use ced_core::errors::ScmResult;

use crate::equation_set::EquationSet;

/// Build the model named by `config.model`.
pub fn build_model(config: &ScmConfig) -> ScmResult<EquationSet> {
    let set = match config.model {
        ScmModel::GermanCredit => german_credit(config)?,
        ScmModel::Karimi => karimi_credit(config)?,
    };
    tracing::debug!(
        model = ?config.model,
        seed = config.seed,
        random_factor = config.random_factor,
        variables = set.len(),
        "built scm"
    );
    Ok(set)
}
