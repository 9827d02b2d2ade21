//! Category weights

use crate::factor::RiskCategory;
use serde::{Deserialize, Serialize};

/// Tolerance when checking that weights sum to one
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Risk model errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RiskError {
    /// Weights are negative or do not sum to 1.0
    #[error("invalid risk weights: {0}")]
    InvalidWeights(String),
}

/// Per-category weights applied to category-average scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskWeights {
    /// Technical weight
    pub technical: f64,
    /// Business weight
    pub business: f64,
    /// Compliance weight
    pub compliance: f64,
    /// Operational weight
    pub operational: f64,
    /// Integration weight
    pub integration: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            technical: 0.25,
            business: 0.30,
            compliance: 0.25,
            operational: 0.15,
            integration: 0.05,
        }
    }
}

impl RiskWeights {
    /// Weight of one category
    #[inline]
    #[must_use]
    pub fn weight(&self, category: RiskCategory) -> f64 {
        match category {
            RiskCategory::Technical => self.technical,
            RiskCategory::Business => self.business,
            RiskCategory::Compliance => self.compliance,
            RiskCategory::Operational => self.operational,
            RiskCategory::Integration => self.integration,
        }
    }

    /// Sum of all weights
    #[must_use]
    pub fn sum(&self) -> f64 {
        RiskCategory::ALL.iter().map(|c| self.weight(*c)).sum()
    }

    /// Check weights are non-negative, finite and sum to 1.0
    ///
    /// # Errors
    /// `RiskError::InvalidWeights` naming the offending category or the sum.
    pub fn validate(&self) -> Result<(), RiskError> {
        for category in RiskCategory::ALL {
            let w = self.weight(category);
            if !w.is_finite() || w < 0.0 {
                return Err(RiskError::InvalidWeights(format!(
                    "{category} weight must be a non-negative number, got {w}"
                )));
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(RiskError::InvalidWeights(format!(
                "weights must sum to 1.0, got {sum}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_are_valid() {
        let w = RiskWeights::default();
        assert!(w.validate().is_ok());
        assert!((w.sum() - 1.0).abs() < 1e-12);
        assert_eq!(w.weight(RiskCategory::Business), 0.30);
    }

    #[test]
    fn rejects_bad_sum() {
        let w = RiskWeights {
            business: 0.5,
            ..RiskWeights::default()
        };
        let err = w.validate().unwrap_err();
        assert!(err.to_string().contains("sum to 1.0"));
    }

    #[test]
    fn rejects_negative_weight() {
        let w = RiskWeights {
            technical: -0.25,
            business: 0.80,
            ..RiskWeights::default()
        };
        assert!(w.validate().is_err());
    }
}
