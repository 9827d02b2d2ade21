//! Whole-system data migration risk
//!
//! Used by the migration pipeline's risk phase. Four factor scores are
//! averaged into an overall score banded as LOW, MEDIUM (>40) or HIGH (>70).

use chrono::{DateTime, Utc};
use mig_model::BusinessCriticality;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape of a data migration, as known before it runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationProfile {
    /// Estimated number of records to move
    pub estimated_records: u64,
    /// Number of source tables
    pub table_count: usize,
    /// Business criticality of the system
    pub business_criticality: BusinessCriticality,
    /// Maximum allowed downtime
    pub max_downtime_hours: f64,
}

impl Default for MigrationProfile {
    fn default() -> Self {
        Self {
            estimated_records: 0,
            table_count: 0,
            business_criticality: BusinessCriticality::Medium,
            max_downtime_hours: 24.0,
        }
    }
}

impl MigrationProfile {
    /// With estimated record count
    #[inline]
    #[must_use]
    pub fn with_records(mut self, records: u64) -> Self {
        self.estimated_records = records;
        self
    }

    /// With table count
    #[inline]
    #[must_use]
    pub fn with_tables(mut self, tables: usize) -> Self {
        self.table_count = tables;
        self
    }

    /// With criticality
    #[inline]
    #[must_use]
    pub fn with_criticality(mut self, criticality: BusinessCriticality) -> Self {
        self.business_criticality = criticality;
        self
    }

    /// With downtime window
    #[inline]
    #[must_use]
    pub fn with_max_downtime_hours(mut self, hours: f64) -> Self {
        self.max_downtime_hours = hours;
        self
    }
}

/// Three-band system risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SystemRiskLevel {
    /// 40 and below
    Low,
    /// Above 40
    Medium,
    /// Above 70
    High,
}

impl SystemRiskLevel {
    /// Band an overall score
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score > 70.0 {
            SystemRiskLevel::High
        } else if score > 40.0 {
            SystemRiskLevel::Medium
        } else {
            SystemRiskLevel::Low
        }
    }
}

impl fmt::Display for SystemRiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SystemRiskLevel::Low => "LOW",
            SystemRiskLevel::Medium => "MEDIUM",
            SystemRiskLevel::High => "HIGH",
        })
    }
}

/// Individual factor scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SystemRiskFactors {
    /// Record volume
    pub data_volume: f64,
    /// Table count
    pub schema_complexity: f64,
    /// Criticality tier
    pub business_criticality: f64,
    /// Downtime tolerance
    pub downtime_window: f64,
}

impl SystemRiskFactors {
    fn mean(&self) -> f64 {
        (self.data_volume + self.schema_complexity + self.business_criticality + self.downtime_window)
            / 4.0
    }
}

/// Result of a system-level assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemRiskAssessment {
    /// Mean of the factor scores
    pub overall_risk_score: f64,
    /// Band of the overall score
    pub risk_level: SystemRiskLevel,
    /// Factor breakdown
    pub risk_factors: SystemRiskFactors,
    /// Threshold-driven recommendations
    pub recommendations: Vec<String>,
    /// When the assessment ran
    pub assessed_at: DateTime<Utc>,
}

/// Scores a [`MigrationProfile`]
#[derive(Debug, Clone, Copy, Default)]
pub struct MigrationRiskEngine;

impl MigrationRiskEngine {
    /// Create new engine
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Assess a profile
    #[must_use]
    pub fn assess(&self, profile: &MigrationProfile) -> SystemRiskAssessment {
        let risk_factors = SystemRiskFactors {
            data_volume: data_volume_risk(profile.estimated_records),
            schema_complexity: schema_complexity_risk(profile.table_count),
            business_criticality: criticality_risk(profile.business_criticality),
            downtime_window: downtime_risk(profile.max_downtime_hours),
        };
        let overall_risk_score = risk_factors.mean();
        let risk_level = SystemRiskLevel::from_score(overall_risk_score);

        tracing::info!(level = %risk_level, score = overall_risk_score, "system risk assessment completed");

        SystemRiskAssessment {
            overall_risk_score,
            risk_level,
            recommendations: recommendations(&risk_factors),
            risk_factors,
            assessed_at: Utc::now(),
        }
    }
}

fn data_volume_risk(records: u64) -> f64 {
    match records {
        r if r > 10_000_000 => 80.0,
        r if r > 1_000_000 => 50.0,
        r if r > 100_000 => 30.0,
        _ => 10.0,
    }
}

fn schema_complexity_risk(tables: usize) -> f64 {
    match tables {
        t if t > 100 => 75.0,
        t if t > 50 => 50.0,
        t if t > 20 => 30.0,
        _ => 15.0,
    }
}

fn criticality_risk(criticality: BusinessCriticality) -> f64 {
    match criticality {
        BusinessCriticality::Critical => 90.0,
        BusinessCriticality::High => 60.0,
        BusinessCriticality::Medium => 40.0,
        BusinessCriticality::Low => 20.0,
    }
}

fn downtime_risk(hours: f64) -> f64 {
    if hours < 2.0 {
        85.0
    } else if hours < 8.0 {
        50.0
    } else if hours < 24.0 {
        30.0
    } else {
        10.0
    }
}

fn recommendations(factors: &SystemRiskFactors) -> Vec<String> {
    let mut recs = Vec::new();
    if factors.data_volume > 60.0 {
        recs.push("Consider incremental migration strategy for large data volumes".to_string());
    }
    if factors.schema_complexity > 60.0 {
        recs.push("Perform thorough schema mapping validation before migration".to_string());
    }
    if factors.business_criticality > 70.0 {
        recs.push("Implement comprehensive rollback plan".to_string());
        recs.push("Schedule migration during off-peak hours".to_string());
    }
    if factors.downtime_window > 70.0 {
        recs.push("Consider zero-downtime migration approach".to_string());
    }
    recs
}
