//! Semi-synthetic SCM calibrated on the German Credit dataset.

use ced_core::config::ScmConfig;
use ced_core::errors::ScmResult;
use ced_core::models::{Activation, VariableKind};

use crate::equation::{LinearEquation, StructuralEquation};
use crate::equation_set::EquationSet;

/// Proper std declared for the outcome, which has no noise term.
const OUTCOME_PROPER_STD: f64 = 0.3;

/// German-credit SCM. Every non-root equation is a noisy weighted sum under
/// `config.activation`; the outcome is a noiseless sigmoid.
///
/// Each weight is the structural coefficient of the parent times that
/// parent's configured multiplier `c_X`.
pub fn german_credit(config: &ScmConfig) -> ScmResult<EquationSet> {
    let rf = config.random_factor;
    let act = config.activation;
    let c = |name: &str| config.coefficient(name);

    let gender = StructuralEquation::new("G", &[], |ctx| {
        let n = ctx.n_samples();
        let draws = ctx.noise().bernoulli(0.5, n)?;
        Ok(draws.into_iter().map(|b| (b - 0.5) * 2.0).collect())
    })
    .with_kind(VariableKind::Binary)
    .with_proper_std(1.0);

    let age = StructuralEquation::new("A", &[], |ctx| {
        let n = ctx.n_samples();
        let draws = ctx.noise().gamma(10.0, 3.5, n)?;
        Ok(draws.into_iter().map(|a| (a - 35.0) / 10.0).collect())
    })
    .with_proper_std(1.0);

    let education = LinearEquation::new("E")
        .term("G", c("G"))
        .term("A", c("A"))
        .noise(1.0, rf)
        .activation(act);

    let job = LinearEquation::new("J")
        .term("G", c("G"))
        .term("A", 2.0 * c("A"))
        .term("E", 4.0 * c("E"))
        .noise(2.0, rf)
        .activation(act);

    let loan_amount = LinearEquation::new("L")
        .term("A", c("A"))
        .term("G", 0.5 * c("G"))
        .noise(3.0, rf)
        .activation(act);

    let loan_duration = LinearEquation::new("D")
        .term("G", c("G"))
        .term("A", -0.5 * c("A"))
        .term("L", 2.0 * c("L"))
        .noise(2.0, rf)
        .activation(act);

    let income = LinearEquation::new("I")
        .term("G", 0.5 * c("G"))
        .term("A", c("A"))
        .term("E", 4.0 * c("E"))
        .term("J", 5.0 * c("J"))
        .noise(4.0, rf)
        .activation(act);

    let savings = LinearEquation::new("S")
        .term("I", 5.0 * c("I"))
        .noise(2.0, rf)
        .activation(act);

    let outcome = LinearEquation::new("Y")
        .term("I", 2.0 * c("I"))
        .term("S", 3.0 * c("S"))
        .term("L", -c("L"))
        .term("D", -c("D"))
        .activation(Activation::sigmoid())
        .proper_std(OUTCOME_PROPER_STD);

    EquationSet::new(config.seed)
        .with(gender)?
        .with(age)?
        .with(education.build())?
        .with(job.build())?
        .with(loan_amount.build())?
        .with(loan_duration.build())?
        .with(income.build())?
        .with(savings.build())?
        .with(outcome.build())
}
