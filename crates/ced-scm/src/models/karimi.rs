//! Nonlinear credit SCM after Karimi et al. (2020), "Algorithmic recourse
//! under imperfect causal knowledge".
//!
//! No equation declares a proper std; pair it with the baseline-std
//! increment policy.

use ced_core::config::ScmConfig;
use ced_core::errors::ScmResult;
use ced_core::models::{Activation, VariableKind};

use crate::equation::StructuralEquation;
use crate::equation_set::EquationSet;

const OUTCOME_SCALE: f64 = 30.0;

fn sig(x: f64) -> f64 {
    Activation::sigmoid().apply(x, 1.0)
}

pub fn karimi_credit(config: &ScmConfig) -> ScmResult<EquationSet> {
    let rf = config.random_factor;

    let gender = StructuralEquation::new("G", &[], |ctx| {
        let n = ctx.n_samples();
        ctx.noise().bernoulli(0.5, n)
    })
    .with_kind(VariableKind::Binary);

    let age = StructuralEquation::new("A", &[], |ctx| {
        let n = ctx.n_samples();
        let draws = ctx.noise().gamma(10.0, 3.5, n)?;
        Ok(draws.into_iter().map(|a| a - 35.0).collect())
    });

    let education = StructuralEquation::new("E", &["G", "A"], move |ctx| {
        let n = ctx.n_samples();
        let noise = ctx.noise().normal(rf * 0.25, n)?;
        let (g, a) = (ctx.parent("G")?, ctx.parent("A")?);
        Ok((0..n)
            .map(|i| -0.5 + sig(-1.0 + 0.5 * g[i] + sig(0.1 * a[i]) + noise[i]))
            .collect())
    });

    let job = StructuralEquation::new("J", &["G", "A", "E"], move |ctx| {
        let n = ctx.n_samples();
        let noise = ctx.noise().normal(rf * 3.0, n)?;
        let (g, a, e) = (ctx.parent("G")?, ctx.parent("A")?, ctx.parent("E")?);
        Ok((0..n)
            .map(|i| -0.5 + sig(0.5 * g[i] + a[i] + 2.0 * e[i] + noise[i]))
            .collect())
    });

    let loan_amount = StructuralEquation::new("L", &["A", "G"], move |ctx| {
        let n = ctx.n_samples();
        let noise = ctx.noise().normal(rf * 4.0, n)?;
        let (a, g) = (ctx.parent("A")?, ctx.parent("G")?);
        Ok((0..n)
            .map(|i| 1.0 - 0.01 * (a[i] - 5.0) * (5.0 - a[i]) + g[i] + noise[i])
            .collect())
    });

    let loan_duration = StructuralEquation::new("D", &["G", "A", "L"], move |ctx| {
        let n = ctx.n_samples();
        let noise = ctx.noise().normal(rf * 9.0, n)?;
        let (g, a, l) = (ctx.parent("G")?, ctx.parent("A")?, ctx.parent("L")?);
        Ok((0..n)
            .map(|i| -1.0 + 0.1 * a[i] + 2.0 * g[i] + l[i] + noise[i])
            .collect())
    });

    let income = StructuralEquation::new("I", &["G", "A", "E", "J"], move |ctx| {
        let n = ctx.n_samples();
        let noise = ctx.noise().normal(rf * 4.0, n)?;
        let (g, a) = (ctx.parent("G")?, ctx.parent("A")?);
        let (e, j) = (ctx.parent("E")?, ctx.parent("J")?);
        Ok((0..n)
            .map(|i| {
                -4.0 + 0.1 * (a[i] + 35.0) + 2.0 * g[i] + g[i] * e[i] + 4.0 * j[i] + noise[i]
            })
            .collect())
    });

    let savings = StructuralEquation::new("S", &["I"], move |ctx| {
        let n = ctx.n_samples();
        let noise = ctx.noise().normal(rf * 25.0, n)?;
        let income = ctx.parent("I")?;
        Ok((0..n)
            .map(|i| -4.0 + 1.5 * income[i].max(0.0) + noise[i])
            .collect())
    });

    let outcome = StructuralEquation::new("Y", &["I", "S", "L", "D"], |ctx| {
        let (inc, s) = (ctx.parent("I")?, ctx.parent("S")?);
        let (l, d) = (ctx.parent("L")?, ctx.parent("D")?);
        Ok((0..ctx.n_samples())
            .map(|i| {
                let x = 0.3 * (inc[i] + s[i] + inc[i] * s[i] - l[i] - d[i]);
                Activation::sigmoid().apply(x, OUTCOME_SCALE)
            })
            .collect())
    });

    EquationSet::new(config.seed)
        .with(gender)?
        .with(age)?
        .with(education)?
        .with(job)?
        .with(loan_amount)?
        .with(loan_duration)?
        .with(income)?
        .with(savings)?
        .with(outcome)
}
