//! CausalEffectEngine: builds the configured SCM, establishes the baseline,
//! then estimates derivatives and assembles the comparison table.

use std::path::Path;

use serde_json::Value;
use tracing::{info, info_span, instrument};

use ced_core::config::CedConfig;
use ced_core::errors::CedResult;
use ced_core::models::{Sample, ScaleTable};
use ced_scm::models::build_model;
use ced_scm::{evaluate, EquationSet, Evaluation};

use crate::derivative::{DerivativeEstimator, DerivativeReport};
use crate::normalize::assemble_comparison;

/// Everything one batch run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOutput {
    pub baseline: Sample,
    pub scales: ScaleTable,
    pub report: DerivativeReport,
    /// `None` when comparison assembly is disabled.
    pub comparison: Option<Sample>,
    /// Rendering of observational rows in exported records.
    pub observational_label: String,
}

impl EngineOutput {
    /// Comparison rows as JSON records, observational rows rendered with
    /// the configured label. Empty when no comparison was assembled.
    pub fn comparison_records(&self) -> Vec<Value> {
        self.comparison
            .as_ref()
            .map(|table| table.to_records(&self.observational_label))
            .unwrap_or_default()
    }

    /// Derivatives keyed by variable, as pretty JSON.
    pub fn report_json(&self) -> CedResult<String> {
        Ok(self.report.to_json()?)
    }
}

/// Batch facade over model construction, evaluation, and estimation.
#[derive(Debug, Clone, Default)]
pub struct CausalEffectEngine {
    config: CedConfig,
}

impl CausalEffectEngine {
    pub fn new(config: CedConfig) -> Self {
        Self { config }
    }

    /// Load and validate a TOML config, `CED_*` overrides applied.
    pub fn from_config_file(path: &Path) -> CedResult<Self> {
        Ok(Self::new(CedConfig::load(path)?))
    }

    pub fn config(&self) -> &CedConfig {
        &self.config
    }

    /// The configured model, unevaluated.
    pub fn model(&self) -> CedResult<EquationSet> {
        Ok(build_model(&self.config.scm)?)
    }

    /// Observational pass: baseline table plus its proper-std table.
    pub fn baseline(&self, set: &EquationSet) -> CedResult<Evaluation> {
        Ok(evaluate(set, self.config.scm.n_samples)?)
    }

    /// Run the whole batch. The scale table is complete before any
    /// intervention starts.
    #[instrument(skip(self), fields(model = ?self.config.scm.model, seed = self.config.scm.seed))]
    pub fn run(&self) -> CedResult<EngineOutput> {
        let n_samples = self.config.scm.n_samples;

        let (set, Evaluation { sample, scales }) = {
            let _span = info_span!("baseline", n_samples).entered();
            let set = self.model()?;
            let evaluation = self.baseline(&set)?;
            (set, evaluation)
        };

        let report = {
            let _span = info_span!("estimate", policy = ?self.config.estimation.policy).entered();
            DerivativeEstimator::new(self.config.estimation.clone())
                .estimate(&sample, &scales, &set, n_samples)?
        };

        let comparison = if self.config.comparison.enabled {
            let _span = info_span!("compare").entered();
            Some(assemble_comparison(
                &sample,
                &report,
                &self.config.comparison,
                self.config.estimation.z_threshold,
            )?)
        } else {
            None
        };

        info!(
            variables = report.len(),
            comparison_rows = comparison.as_ref().map_or(0, Sample::n_rows),
            "engine run complete"
        );
        Ok(EngineOutput {
            baseline: sample,
            scales,
            report,
            comparison,
            observational_label: self.config.comparison.observational_label.clone(),
        })
    }
}
