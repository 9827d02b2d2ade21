//! Migration risk model
//!
//! Aggregates categorized, weighted risk factors into a readiness score:
//! - [`RiskAssessor`] scores a customer or a single channel
//! - [`MigrationRiskEngine`] scores a whole-system data migration profile
//! - [`RiskWeights`] holds the category weights (must sum to 1.0)
//!
//! Scoring is deterministic: identical inputs produce bit-identical scores.
//!
//! # Example
//!
//! ```rust,ignore
//! use mig_risk::RiskAssessor;
//!
//! let assessment = RiskAssessor::new().assess_customer(&customer);
//! println!("{} ({})", assessment.overall_risk_score, assessment.risk_level);
//! ```

#![warn(unreachable_pub)]

pub mod assessor;
pub mod factor;
pub mod system;
pub mod weights;

pub use assessor::RiskAssessor;
pub use factor::{RiskAssessment, RiskCategory, RiskFactor, RiskSeverity};
pub use system::{
    MigrationProfile, MigrationRiskEngine, SystemRiskAssessment, SystemRiskFactors, SystemRiskLevel,
};
pub use weights::{RiskError, RiskWeights};
