//! Orchestrator configuration
//!
//! Loaded from TOML or YAML (chosen by file extension) and validated before
//! use. Every section has defaults, so a partial file is enough.

use crate::consensus::DEFAULT_CONSENSUS_THRESHOLD;
use crate::error::{MigrationError, Result};
use mig_risk::RiskWeights;
use mig_simulation::DEFAULT_PASS_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Simulation settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Minimum success rate (percentage) for a passing simulation
    pub pass_threshold: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            pass_threshold: DEFAULT_PASS_THRESHOLD,
        }
    }
}

/// Cutover health thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CutoverThresholds {
    /// Error rate (percentage) above which health is degraded
    pub max_error_rate: f64,
    /// Latency (ms) above which health is degraded
    pub max_latency_ms: f64,
}

impl Default for CutoverThresholds {
    fn default() -> Self {
        Self {
            max_error_rate: 5.0,
            max_latency_ms: 1000.0,
        }
    }
}

/// Data migration pipeline settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// A failed validation phase fails the whole run
    pub fail_on_validation_mismatch: bool,
    /// Weighted approval required by the consensus gate
    pub consensus_threshold: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fail_on_validation_mismatch: true,
            consensus_threshold: DEFAULT_CONSENSUS_THRESHOLD,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Risk category weights
    pub risk_weights: RiskWeights,
    /// Simulation settings
    pub simulation: SimulationSettings,
    /// Cutover thresholds
    pub cutover: CutoverThresholds,
    /// Pipeline settings
    pub pipeline: PipelineConfig,
}

impl OrchestratorConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With risk weights
    #[inline]
    #[must_use]
    pub fn with_risk_weights(mut self, weights: RiskWeights) -> Self {
        self.risk_weights = weights;
        self
    }

    /// With simulation pass threshold
    #[inline]
    #[must_use]
    pub fn with_pass_threshold(mut self, threshold: f64) -> Self {
        self.simulation.pass_threshold = threshold;
        self
    }

    /// With cutover thresholds
    #[inline]
    #[must_use]
    pub fn with_cutover_thresholds(mut self, thresholds: CutoverThresholds) -> Self {
        self.cutover = thresholds;
        self
    }

    /// With pipeline settings
    #[inline]
    #[must_use]
    pub fn with_pipeline(mut self, pipeline: PipelineConfig) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Load and validate a `.toml`, `.yaml` or `.yml` file
    ///
    /// # Errors
    /// `MigrationError::Config` for unreadable, unparsable or unsupported files;
    /// validation errors as in [`validate`](Self::validate).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| MigrationError::Config(format!("cannot read {}: {e}", path.display())))?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let config: Self = match ext.as_str() {
            "toml" => toml::from_str(&text)
                .map_err(|e| MigrationError::Config(format!("invalid TOML in {}: {e}", path.display())))?,
            "yaml" | "yml" => serde_yaml::from_str(&text)
                .map_err(|e| MigrationError::Config(format!("invalid YAML in {}: {e}", path.display())))?,
            other => {
                return Err(MigrationError::Config(format!(
                    "unsupported config format '{other}' for {}",
                    path.display()
                )))
            }
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Check weights and thresholds
    ///
    /// Accepted ranges:
    /// - `risk_weights`: non-negative, summing to 1
    /// - `simulation.pass_threshold`: `[0, 100]`
    /// - `cutover.max_error_rate`: `[0, 100]`
    /// - `cutover.max_latency_ms`: finite and positive
    /// - `pipeline.consensus_threshold`: `(0, 1]`
    ///
    /// # Errors
    /// `MigrationError::Risk` for bad weights, `MigrationError::Config` for
    /// out-of-range thresholds.
    pub fn validate(&self) -> Result<()> {
        self.risk_weights.validate()?;

        let pct = 0.0..=100.0;
        if !pct.contains(&self.simulation.pass_threshold) {
            return Err(MigrationError::Config(format!(
                "simulation.pass_threshold must be within 0-100, got {}",
                self.simulation.pass_threshold
            )));
        }
        if !pct.contains(&self.cutover.max_error_rate) {
            return Err(MigrationError::Config(format!(
                "cutover.max_error_rate must be within 0-100, got {}",
                self.cutover.max_error_rate
            )));
        }
        if !(self.cutover.max_latency_ms > 0.0 && self.cutover.max_latency_ms.is_finite()) {
            return Err(MigrationError::Config(format!(
                "cutover.max_latency_ms must be positive, got {}",
                self.cutover.max_latency_ms
            )));
        }
        let t = self.pipeline.consensus_threshold;
        if !(t > 0.0 && t <= 1.0) {
            return Err(MigrationError::Config(format!(
                "pipeline.consensus_threshold must be within (0, 1], got {t}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_are_valid() {
        let config = OrchestratorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.simulation.pass_threshold, 95.0);
        assert_eq!(config.cutover.max_error_rate, 5.0);
        assert_eq!(config.cutover.max_latency_ms, 1000.0);
        assert!(config.pipeline.fail_on_validation_mismatch);
    }

    #[test]
    fn loads_partial_toml() {
        let file = write_temp(
            ".toml",
            "[simulation]\npass_threshold = 90.0\n\n[cutover]\nmax_latency_ms = 500.0\n",
        );
        let config = OrchestratorConfig::from_path(file.path()).unwrap();
        assert_eq!(config.simulation.pass_threshold, 90.0);
        assert_eq!(config.cutover.max_latency_ms, 500.0);
        assert_eq!(config.cutover.max_error_rate, 5.0);
    }

    #[test]
    fn loads_yaml() {
        let file = write_temp(".yaml", "pipeline:\n  fail_on_validation_mismatch: false\n");
        let config = OrchestratorConfig::from_path(file.path()).unwrap();
        assert!(!config.pipeline.fail_on_validation_mismatch);
    }

    #[test]
    fn rejects_bad_weights_and_formats() {
        let file = write_temp(".toml", "[risk_weights]\nbusiness = 0.9\n");
        let err = OrchestratorConfig::from_path(file.path()).unwrap_err();
        assert!(matches!(err, MigrationError::Risk(_)));

        let file = write_temp(".json", "{}");
        let err = OrchestratorConfig::from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("unsupported config format"));
    }

    #[test]
    fn rejects_out_of_range_thresholds() {
        let config = OrchestratorConfig::new().with_pass_threshold(120.0);
        assert!(matches!(config.validate(), Err(MigrationError::Config(_))));
        for edge in [0.0, 100.0] {
            assert!(OrchestratorConfig::new().with_pass_threshold(edge).validate().is_ok());
        }
        assert!(OrchestratorConfig::new().with_pass_threshold(f64::NAN).validate().is_err());

        let config = OrchestratorConfig::new().with_cutover_thresholds(CutoverThresholds {
            max_error_rate: 101.0,
            max_latency_ms: 1000.0,
        });
        assert!(config.validate().is_err());
        let config = OrchestratorConfig::new().with_cutover_thresholds(CutoverThresholds {
            max_error_rate: 5.0,
            max_latency_ms: 0.0,
        });
        assert!(config.validate().is_err());

        let config = OrchestratorConfig::new().with_pipeline(PipelineConfig {
            consensus_threshold: 0.0,
            ..PipelineConfig::default()
        });
        assert!(config.validate().is_err());
    }
}
