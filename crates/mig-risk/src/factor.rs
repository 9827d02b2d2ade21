//! Risk factors and assessments

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category a risk factor is weighted under
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    /// Technology and protocol complexity
    Technical,
    /// Business impact of disruption
    Business,
    /// Regulatory exposure
    Compliance,
    /// Day-to-day operations
    Operational,
    /// Integration surface and endpoints
    Integration,
}

impl RiskCategory {
    /// Fixed iteration order used when aggregating
    pub const ALL: [RiskCategory; 5] = [
        RiskCategory::Technical,
        RiskCategory::Business,
        RiskCategory::Compliance,
        RiskCategory::Operational,
        RiskCategory::Integration,
    ];

    /// Canonical string form
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Technical => "technical",
            RiskCategory::Business => "business",
            RiskCategory::Compliance => "compliance",
            RiskCategory::Operational => "operational",
            RiskCategory::Integration => "integration",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity band of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskSeverity {
    /// Below 30
    #[default]
    Low,
    /// 30 up to 50
    Medium,
    /// 50 up to 70
    High,
    /// 70 and above
    Critical,
}

impl RiskSeverity {
    /// Band a 0-100 score
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 70.0 {
            RiskSeverity::Critical
        } else if score >= 50.0 {
            RiskSeverity::High
        } else if score >= 30.0 {
            RiskSeverity::Medium
        } else {
            RiskSeverity::Low
        }
    }

    /// High or critical
    #[inline]
    #[must_use]
    pub fn is_elevated(&self) -> bool {
        *self >= RiskSeverity::High
    }

    /// Canonical string form
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskSeverity::Low => "low",
            RiskSeverity::Medium => "medium",
            RiskSeverity::High => "high",
            RiskSeverity::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One identified risk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    /// Factor identifier (`BIZ-CRIT-xxxxxx`, `COMP-xxxxxx`, ...)
    pub factor_id: String,
    /// Weighting category
    pub category: RiskCategory,
    /// Severity band
    pub severity: RiskSeverity,
    /// What the risk is
    pub description: String,
    /// Impact, 0-100
    pub impact_score: f64,
    /// Likelihood, 0-100
    pub likelihood_score: f64,
    /// How to reduce it
    pub mitigation_strategy: Option<String>,
}

impl RiskFactor {
    /// Create a factor; impact and likelihood are clamped into `[0, 100]` and
    /// severity is derived from the resulting score
    #[must_use]
    pub fn new(
        factor_id: impl Into<String>,
        category: RiskCategory,
        description: impl Into<String>,
        impact_score: f64,
        likelihood_score: f64,
    ) -> Self {
        let impact_score = clamp_score(impact_score);
        let likelihood_score = clamp_score(likelihood_score);
        Self {
            factor_id: factor_id.into(),
            category,
            severity: RiskSeverity::from_score(impact_score * likelihood_score / 100.0),
            description: description.into(),
            impact_score,
            likelihood_score,
            mitigation_strategy: None,
        }
    }

    /// Override the derived severity
    #[inline]
    #[must_use]
    pub fn with_severity(mut self, severity: RiskSeverity) -> Self {
        self.severity = severity;
        self
    }

    /// With mitigation text
    #[inline]
    #[must_use]
    pub fn with_mitigation(mut self, mitigation: impl Into<String>) -> Self {
        self.mitigation_strategy = Some(mitigation.into());
        self
    }

    /// `impact * likelihood / 100`, always within `[0, 100]`
    #[inline]
    #[must_use]
    pub fn risk_score(&self) -> f64 {
        self.impact_score * self.likelihood_score / 100.0
    }
}

fn clamp_score(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 100.0)
    }
}

/// Result of assessing a customer or one of its channels
///
/// Built once per assessment call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Assessment identifier
    pub assessment_id: String,
    /// Customer assessed
    pub customer_id: String,
    /// Channel, for channel-level assessments
    pub channel_id: Option<String>,
    /// Factors in discovery order
    pub risk_factors: Vec<RiskFactor>,
    /// Category-weighted score, 0-100
    pub overall_risk_score: f64,
    /// Severity band of the overall score
    pub risk_level: RiskSeverity,
    /// `100 - overall_risk_score`
    pub migration_readiness_score: f64,
    /// Recommended actions
    pub recommended_actions: Vec<String>,
    /// When the assessment ran
    pub assessed_at: DateTime<Utc>,
    /// Assessor identity
    pub assessed_by: String,
}

impl RiskAssessment {
    /// Factors in the high or critical band
    pub fn elevated_factors(&self) -> impl Iterator<Item = &RiskFactor> {
        self.risk_factors.iter().filter(|f| f.severity.is_elevated())
    }

    /// Factors of one category
    pub fn factors_in(&self, category: RiskCategory) -> impl Iterator<Item = &RiskFactor> {
        self.risk_factors.iter().filter(move |f| f.category == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_thresholds() {
        assert_eq!(RiskSeverity::from_score(0.0), RiskSeverity::Low);
        assert_eq!(RiskSeverity::from_score(29.99), RiskSeverity::Low);
        assert_eq!(RiskSeverity::from_score(30.0), RiskSeverity::Medium);
        assert_eq!(RiskSeverity::from_score(50.0), RiskSeverity::High);
        assert_eq!(RiskSeverity::from_score(69.9), RiskSeverity::High);
        assert_eq!(RiskSeverity::from_score(70.0), RiskSeverity::Critical);
    }

    #[test]
    fn factor_score_and_severity() {
        let f = RiskFactor::new("F1", RiskCategory::Business, "crit", 80.0, 95.0);
        assert!((f.risk_score() - 76.0).abs() < 1e-9);
        assert_eq!(f.severity, RiskSeverity::Critical);
    }

    #[test]
    fn factor_inputs_are_clamped() {
        let f = RiskFactor::new("F1", RiskCategory::Technical, "x", 150.0, -3.0);
        assert_eq!(f.impact_score, 100.0);
        assert_eq!(f.likelihood_score, 0.0);
        assert_eq!(f.risk_score(), 0.0);

        let nan = RiskFactor::new("F2", RiskCategory::Technical, "x", f64::NAN, 50.0);
        assert_eq!(nan.risk_score(), 0.0);
    }

    #[test]
    fn forced_severity() {
        let f = RiskFactor::new("F1", RiskCategory::Compliance, "HIPAA", 70.0, 40.0)
            .with_severity(RiskSeverity::High);
        assert_eq!(f.severity, RiskSeverity::High);
        assert_eq!(RiskSeverity::from_score(f.risk_score()), RiskSeverity::Low);
    }
}
