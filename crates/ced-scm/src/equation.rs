//! Structural equations: one generator per variable.
//!
//! A generator is a pure function of the sample count, the already-computed
//! parent columns, and the variable's own seeded noise stream. Two ways to
//! declare one are equivalent: hand a closure to [`StructuralEquation::new`],
//! or describe a weighted sum with [`LinearEquation`] and `build()` it.

use std::fmt;
use std::sync::Arc;

use ced_core::errors::{ScmError, ScmResult};
use ced_core::models::stats::l2_norm;
use ced_core::models::{Activation, VariableKind};

use crate::noise::NoiseStream;

/// Shared generator closure.
pub type Generator = Arc<dyn Fn(&mut EquationContext<'_>) -> ScmResult<Vec<f64>> + Send + Sync>;

/// Inputs handed to a generator for one evaluation pass.
pub struct EquationContext<'a> {
    variable: &'a str,
    n_samples: usize,
    parents: Vec<(&'a str, &'a [f64])>,
    noise: NoiseStream,
}

impl<'a> EquationContext<'a> {
    pub fn new(
        variable: &'a str,
        n_samples: usize,
        parents: Vec<(&'a str, &'a [f64])>,
        noise: NoiseStream,
    ) -> Self {
        Self {
            variable,
            n_samples,
            parents,
            noise,
        }
    }

    pub fn variable(&self) -> &'a str {
        self.variable
    }

    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Column of a declared parent.
    pub fn parent(&self, name: &str) -> ScmResult<&'a [f64]> {
        self.parents
            .iter()
            .find(|(p, _)| *p == name)
            .map(|(_, col)| *col)
            .ok_or_else(|| ScmError::UndeclaredParent {
                variable: self.variable.to_string(),
                parent: name.to_string(),
            })
    }

    pub fn noise(&mut self) -> &mut NoiseStream {
        &mut self.noise
    }
}

/// One node of the SCM: name, declared parents, optional proper std, and
/// the generator that produces its column.
#[derive(Clone)]
pub struct StructuralEquation {
    name: String,
    kind: VariableKind,
    parents: Vec<String>,
    proper_std: Option<f64>,
    generator: Generator,
}

impl StructuralEquation {
    pub fn new<F>(name: impl Into<String>, parents: &[&str], generator: F) -> Self
    where
        F: Fn(&mut EquationContext<'_>) -> ScmResult<Vec<f64>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            kind: VariableKind::Real,
            parents: parents.iter().map(|p| p.to_string()).collect(),
            proper_std: None,
            generator: Arc::new(generator),
        }
    }

    pub fn with_kind(mut self, kind: VariableKind) -> Self {
        self.kind = kind;
        self
    }

    /// Declare the scale recorded in the proper-std table on evaluation.
    pub fn with_proper_std(mut self, scale: f64) -> Self {
        self.proper_std = Some(scale);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    pub fn parents(&self) -> &[String] {
        &self.parents
    }

    pub fn proper_std(&self) -> Option<f64> {
        self.proper_std
    }

    /// Run the generator and check the output length.
    pub fn generate(&self, ctx: &mut EquationContext<'_>) -> ScmResult<Vec<f64>> {
        let values = (self.generator)(ctx)?;
        if values.len() != ctx.n_samples() {
            return Err(ScmError::ShapeMismatch {
                variable: self.name.clone(),
                expected: ctx.n_samples(),
                actual: values.len(),
            });
        }
        Ok(values)
    }
}

impl fmt::Debug for StructuralEquation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructuralEquation")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("parents", &self.parents)
            .field("proper_std", &self.proper_std)
            .finish_non_exhaustive()
    }
}

/// Builder for `activation(Σ w_p · parent_p + N(0, rf · g_N), scale = ‖w, rf · g_N‖₂)`.
///
/// Weights are the product of the structural coefficient `k_p` and the
/// configured multiplier `c_p`. When a noise term is present the proper std
/// is `sqrt(rf · g_N / norm)`, unless one is declared explicitly.
#[derive(Debug, Clone)]
pub struct LinearEquation {
    name: String,
    terms: Vec<(String, f64)>,
    noise_std: Option<f64>,
    activation: Activation,
    proper_std: Option<f64>,
}

impl LinearEquation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            terms: Vec::new(),
            noise_std: None,
            activation: Activation::Linear,
            proper_std: None,
        }
    }

    pub fn term(mut self, parent: impl Into<String>, weight: f64) -> Self {
        self.terms.push((parent.into(), weight));
        self
    }

    /// Add the noise term `N(0, random_factor * gain)`.
    pub fn noise(mut self, gain: f64, random_factor: f64) -> Self {
        self.noise_std = Some(random_factor * gain);
        self
    }

    pub fn activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    pub fn proper_std(mut self, scale: f64) -> Self {
        self.proper_std = Some(scale);
        self
    }

    /// L2 norm of the weights and the noise std; the activation scale.
    pub fn norm(&self) -> f64 {
        let mut terms: Vec<f64> = self.terms.iter().map(|(_, w)| *w).collect();
        if let Some(std) = self.noise_std {
            terms.push(std);
        }
        l2_norm(&terms)
    }

    /// The scale this equation records in the proper-std table.
    pub fn effective_proper_std(&self) -> Option<f64> {
        self.proper_std.or_else(|| {
            self.noise_std
                .map(|std| compute_proper_std(std, self.norm()))
        })
    }

    pub fn build(self) -> StructuralEquation {
        let norm = self.norm();
        let proper_std = self.effective_proper_std();
        let parents: Vec<&str> = self.terms.iter().map(|(p, _)| p.as_str()).collect();
        let terms = self.terms.clone();
        let noise_std = self.noise_std;
        let activation = self.activation;

        let equation = StructuralEquation::new(self.name.clone(), &parents, move |ctx| {
            let n = ctx.n_samples();
            let mut acc = vec![0.0; n];
            for (parent, weight) in &terms {
                let column = ctx.parent(parent)?;
                for (a, x) in acc.iter_mut().zip(column) {
                    *a += weight * x;
                }
            }
            if let Some(std) = noise_std {
                let noise = ctx.noise().normal(std, n)?;
                for (a, e) in acc.iter_mut().zip(noise) {
                    *a += e;
                }
            }
            Ok(activation.apply_all(&acc, norm))
        });

        match proper_std {
            Some(scale) => equation.with_proper_std(scale),
            None => equation,
        }
    }
}

/// `sqrt(noise_std / norm)`: the scale of a linear equation relative to
/// the combined magnitude of its inputs.
pub fn compute_proper_std(noise_std: f64, norm: f64) -> f64 {
    (noise_std / norm).sqrt()
}
