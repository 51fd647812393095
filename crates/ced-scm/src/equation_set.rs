//! Ordered collection of structural equations and the do-operation.

use ced_core::errors::{ScmError, ScmResult};

use crate::equation::StructuralEquation;
use crate::graph::CausalGraph;

/// Replacement value forced onto a variable by a do-intervention.
#[derive(Debug, Clone, PartialEq)]
pub enum Override {
    /// Every row set to the same value.
    Constant(f64),
    /// A fixed column; its length must equal the evaluation's sample count.
    Values(Vec<f64>),
    /// A provided column plus an additive shift.
    Shift { base: Vec<f64>, shift: f64 },
}

impl Override {
    /// The column this override produces for `n` rows.
    pub fn materialize(&self, n: usize) -> Vec<f64> {
        match self {
            Self::Constant(c) => vec![*c; n],
            Self::Values(values) => values.clone(),
            Self::Shift { base, shift } => base.iter().map(|x| x + shift).collect(),
        }
    }
}

/// An SCM: equations in declaration order plus the base seed.
///
/// Declaration order breaks ties in the evaluation order and fixes each
/// variable's seed offset.
#[derive(Debug, Clone)]
pub struct EquationSet {
    seed: u64,
    equations: Vec<StructuralEquation>,
}

impl EquationSet {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            equations: Vec::new(),
        }
    }

    /// Append an equation. Names must be unique.
    pub fn declare(&mut self, equation: StructuralEquation) -> ScmResult<()> {
        if self.index_of(equation.name()).is_some() {
            return Err(ScmError::DuplicateVariable {
                name: equation.name().to_string(),
            });
        }
        self.equations.push(equation);
        Ok(())
    }

    /// Chainable form of [`EquationSet::declare`].
    pub fn with(mut self, equation: StructuralEquation) -> ScmResult<Self> {
        self.declare(equation)?;
        Ok(self)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn len(&self) -> usize {
        self.equations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equations.is_empty()
    }

    pub fn equations(&self) -> &[StructuralEquation] {
        &self.equations
    }

    /// Variable names in declaration order.
    pub fn names(&self) -> Vec<&str> {
        self.equations.iter().map(StructuralEquation::name).collect()
    }

    pub fn get(&self, name: &str) -> Option<&StructuralEquation> {
        self.equations.iter().find(|eq| eq.name() == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.equations.iter().position(|eq| eq.name() == name)
    }

    /// Seed of the noise stream owned by `name`: base seed plus declaration index.
    pub fn seed_for(&self, name: &str) -> ScmResult<u64> {
        self.index_of(name)
            .map(|idx| self.seed.wrapping_add(idx as u64))
            .ok_or_else(|| ScmError::UnknownVariable {
                name: name.to_string(),
            })
    }

    /// do(target := value). Returns a new set in which `target` ignores its
    /// parents and emits the override. Position, kind, and every other
    /// equation are unchanged, so seed offsets line up with the un-intervened set.
    pub fn intervene(&self, target: &str, value: Override) -> ScmResult<EquationSet> {
        let idx = self.index_of(target).ok_or_else(|| ScmError::UnknownVariable {
            name: target.to_string(),
        })?;
        let kind = self.equations[idx].kind();
        let replacement = StructuralEquation::new(target, &[], move |ctx| {
            Ok(value.materialize(ctx.n_samples()))
        })
        .with_kind(kind);

        let mut equations = self.equations.clone();
        equations[idx] = replacement;
        tracing::debug!(variable = target, index = idx, "do-intervention applied");
        Ok(Self {
            seed: self.seed,
            equations,
        })
    }

    /// The parent relation as a validated DAG.
    pub fn graph(&self) -> ScmResult<CausalGraph> {
        CausalGraph::from_equations(self)
    }
}
