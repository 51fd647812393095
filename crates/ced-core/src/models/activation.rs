//! Activation transforms applied by structural equations.
//!
//! Every transform takes the combined pre-activation value `x` and a scale
//! (typically the L2 norm of the equation's weights) and returns the emitted
//! value. The scale is part of the equation's declared behaviour.

use serde::{Deserialize, Serialize};

fn unit_factor() -> f64 {
    1.0
}

fn unit_k() -> f64 {
    1.0
}

/// Squashing function combining weighted parents and noise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Activation {
    /// `x / scale`
    #[default]
    Linear,
    /// `factor / (1 + exp(-x / scale))`
    Sigmoid {
        #[serde(default = "unit_factor")]
        factor: f64,
    },
    /// `factor * sign(x) * ln(1 + |x/scale|) / (1 + ln(1 + |x/scale|))`
    LogSigmoid {
        #[serde(default = "unit_factor")]
        factor: f64,
    },
    /// `factor * sign(x) * |x/scale|^k / (1 + |x/scale|)`
    KSigmoid {
        #[serde(default = "unit_k")]
        k: f64,
        #[serde(default = "unit_factor")]
        factor: f64,
    },
}

impl Activation {
    /// Plain logistic sigmoid with unit factor.
    pub const fn sigmoid() -> Self {
        Self::Sigmoid { factor: 1.0 }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Sigmoid { .. } => "sigmoid",
            Self::LogSigmoid { .. } => "log_sigmoid",
            Self::KSigmoid { .. } => "k_sigmoid",
        }
    }

    /// Apply the transform to a single value.
    pub fn apply(&self, x: f64, scale: f64) -> f64 {
        match *self {
            Self::Linear => x / scale,
            Self::Sigmoid { factor } => factor * logistic(x / scale),
            Self::LogSigmoid { factor } => {
                let z = (x / scale).abs().ln_1p();
                factor * sign(x) * z / (1.0 + z)
            }
            Self::KSigmoid { k, factor } => {
                let z = (x / scale).abs();
                factor * sign(x) * z.powf(k) / (1.0 + z)
            }
        }
    }

    /// Apply the transform element-wise.
    pub fn apply_all(&self, values: &[f64], scale: f64) -> Vec<f64> {
        values.iter().map(|&x| self.apply(x, scale)).collect()
    }
}

impl std::fmt::Display for Activation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// `1 / (1 + exp(-z))` without overflow for large `|z|`.
fn logistic(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// numpy-style sign: zero maps to zero.
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}
