//! Hand-built toy SCMs shared by the workspace test suites.
//!
//! Each builder returns a fresh `EquationSet`; none of them touch the
//! credit calibrations.

use std::sync::{Arc, Mutex};

use ced_core::errors::ScmResult;
use ced_scm::{EquationSet, LinearEquation, StructuralEquation};

/// `I` evenly spaced on `[-0.5, 0.5)`, `Y = I`, no noise, unit proper std on both.
///
/// No row is ever a 3-sigma outlier, so the derivative of `Y` with respect
/// to `I` is exactly 1.
pub fn identity_outcome(seed: u64) -> EquationSet {
    let mut set = EquationSet::new(seed);
    set.declare(
        StructuralEquation::new("I", &[], |ctx| {
            let n = ctx.n_samples();
            Ok((0..n).map(|i| i as f64 / n as f64 - 0.5).collect())
        })
        .with_proper_std(1.0),
    )
    .expect("fresh set");
    set.declare(
        StructuralEquation::new("Y", &["I"], |ctx| Ok(ctx.parent("I")?.to_vec()))
            .with_proper_std(1.0),
    )
    .expect("fresh set");
    set
}

/// `X -> M -> Y` plus an independent root `W`, all noisy linear equations
/// with builder-derived proper stds.
pub fn noisy_chain(seed: u64) -> EquationSet {
    let root = |name: &str| {
        StructuralEquation::new(name, &[], |ctx| {
            let n = ctx.n_samples();
            ctx.noise().normal(1.0, n)
        })
        .with_proper_std(1.0)
    };
    EquationSet::new(seed)
        .with(root("X"))
        .and_then(|s| s.with(LinearEquation::new("M").term("X", 2.0).noise(1.0, 0.5).build()))
        .and_then(|s| s.with(root("W")))
        .and_then(|s| {
            s.with(
                LinearEquation::new("Y")
                    .term("M", 1.5)
                    .term("W", -0.5)
                    .noise(0.5, 0.5)
                    .build(),
            )
        })
        .expect("fresh set")
}

/// `A` and `B` each name the other as a parent.
pub fn two_cycle() -> EquationSet {
    let echo = |name: &str, parent: &'static str| {
        StructuralEquation::new(name, &[parent], move |ctx| Ok(ctx.parent(parent)?.to_vec()))
    };
    EquationSet::new(0)
        .with(echo("A", "B"))
        .and_then(|s| s.with(echo("B", "A")))
        .expect("fresh set")
}

/// `A` declares a parent that is never declared.
pub fn undeclared_parent() -> EquationSet {
    EquationSet::new(0)
        .with(StructuralEquation::new("A", &["ghost"], |ctx| {
            Ok(vec![0.0; ctx.n_samples()])
        }))
        .expect("fresh set")
}

/// Evaluation order recorded by sentinel generators.
pub type CallLog = Arc<Mutex<Vec<String>>>;

/// A diamond declared children-first: `Y(M, X)`, `M(X)`, `Z()`, `X()`.
///
/// Every generator appends its name to the returned log, checks that each
/// parent column is fully written with that parent's marker, and emits its
/// own marker (declaration index + 1) on every row.
pub fn sentinel_diamond() -> (EquationSet, CallLog) {
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let nodes: [(&'static str, &'static [&'static str], f64); 4] = [
        ("Y", &["M", "X"], 1.0),
        ("M", &["X"], 2.0),
        ("Z", &[], 3.0),
        ("X", &[], 4.0),
    ];
    let marker = |name: &str| -> f64 {
        nodes.iter()
            .find(|(n, _, _)| *n == name)
            .map(|(_, _, m)| *m)
            .unwrap_or(f64::NAN)
    };

    let mut set = EquationSet::new(0);
    for (name, parents, own) in nodes {
        let log = Arc::clone(&log);
        let parent_markers: Vec<(&'static str, f64)> =
            parents.iter().map(|&p| (p, marker(p))).collect();
        let equation = StructuralEquation::new(name, parents, move |ctx| -> ScmResult<Vec<f64>> {
            log.lock().expect("log lock").push(name.to_string());
            for (parent, expected) in &parent_markers {
                let column = ctx.parent(parent)?;
                assert!(
                    column.iter().all(|v| v == expected),
                    "{name} ran before {parent} was fully computed"
                );
            }
            Ok(vec![own; ctx.n_samples()])
        });
        set.declare(equation).expect("fresh set");
    }
    (set, log)
}
