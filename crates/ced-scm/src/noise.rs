//! Deterministic per-variable random streams.
//!
//! Every variable draws from its own `StdRng` seeded with `base + offset`,
//! so re-evaluating a descendant after an upstream intervention replays the
//! exact same noise. There is no shared global stream.

use rand::distributions::{Bernoulli, Distribution};
use rand::rngs::StdRng;
use rand::SeedableRng;
use statrs::distribution::{Gamma, Normal};

use ced_core::errors::{ScmError, ScmResult};

/// Seeded noise source owned by one equation for one evaluation pass.
pub struct NoiseStream {
    variable: String,
    seed: u64,
    rng: StdRng,
}

impl NoiseStream {
    pub fn new(variable: &str, seed: u64) -> Self {
        Self {
            variable: variable.to_string(),
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// `n` draws from `N(0, std_dev)`. A zero `std_dev` yields zeros.
    pub fn normal(&mut self, std_dev: f64, n: usize) -> ScmResult<Vec<f64>> {
        if std_dev == 0.0 {
            return Ok(vec![0.0; n]);
        }
        let dist = Normal::new(0.0, std_dev).map_err(|e| self.invalid(e))?;
        Ok((0..n).map(|_| dist.sample(&mut self.rng)).collect())
    }

    /// `n` draws from a gamma distribution with the given shape and scale.
    pub fn gamma(&mut self, shape: f64, scale: f64, n: usize) -> ScmResult<Vec<f64>> {
        if scale.is_nan() || scale <= 0.0 {
            return Err(self.invalid(format!("gamma scale must be positive, got {scale}")));
        }
        let dist = Gamma::new(shape, 1.0 / scale).map_err(|e| self.invalid(e))?;
        Ok((0..n).map(|_| dist.sample(&mut self.rng)).collect())
    }

    /// `n` Bernoulli(p) draws as `0.0` / `1.0`.
    pub fn bernoulli(&mut self, p: f64, n: usize) -> ScmResult<Vec<f64>> {
        let dist = Bernoulli::new(p).map_err(|e| self.invalid(e))?;
        Ok((0..n)
            .map(|_| if dist.sample(&mut self.rng) { 1.0 } else { 0.0 })
            .collect())
    }

    fn invalid(&self, reason: impl ToString) -> ScmError {
        ScmError::InvalidNoise {
            variable: self.variable.clone(),
            reason: reason.to_string(),
        }
    }
}
