//! Customer and channel risk assessment
//!
//! Factor tables:
//! - Customer: criticality tier, one factor per compliance regime, channel count
//!   above five, legacy channel types, missing contact details
//! - Channel: type complexity, missing target endpoint, daily volume above 10 000
//!
//! The overall score averages factor scores per category, then takes the
//! weighted sum over categories (capped at 100).

use crate::factor::{RiskAssessment, RiskCategory, RiskFactor, RiskSeverity};
use crate::weights::{RiskError, RiskWeights};
use chrono::Utc;
use mig_model::{BusinessCriticality, ChannelType, Customer, IntegrationChannel};

/// Channels above this count add an integration factor
const MAX_CHANNELS_BEFORE_RISK: usize = 5;
/// Daily volume above this adds an operational factor
const HIGH_VOLUME_THRESHOLD: u64 = 10_000;
/// Daily volume above this triggers a load-testing recommendation
const LOAD_TEST_THRESHOLD: u64 = 5_000;
/// Channel count above this triggers a sequencing recommendation
const SEQUENCING_THRESHOLD: usize = 3;

/// Scores customers and channels
#[derive(Debug, Clone, Default)]
pub struct RiskAssessor {
    weights: RiskWeights,
}

impl RiskAssessor {
    /// Assessor with the default category weights
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assessor with custom weights
    ///
    /// # Errors
    /// `RiskError::InvalidWeights` if the weights do not validate.
    pub fn with_weights(weights: RiskWeights) -> Result<Self, RiskError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    /// Active weights
    #[inline]
    #[must_use]
    pub fn weights(&self) -> &RiskWeights {
        &self.weights
    }

    /// Assess a whole customer
    #[must_use]
    pub fn assess_customer(&self, customer: &Customer) -> RiskAssessment {
        let mut factors = Vec::new();
        factors.push(business_criticality_factor(customer.business_criticality));
        factors.extend(compliance_factors(customer));
        factors.extend(channel_mix_factors(customer));
        factors.extend(operational_factors(customer));

        let overall = self.overall_score(&factors);
        let recommended_actions = customer_recommendations(&factors, customer);

        tracing::debug!(
            customer_id = %customer.customer_id,
            factors = factors.len(),
            score = overall,
            "customer risk assessed"
        );

        build_assessment(
            format!("RISK-{}", short_id(8)),
            customer,
            None,
            factors,
            overall,
            recommended_actions,
        )
    }

    /// Assess one channel of a customer
    #[must_use]
    pub fn assess_channel(&self, customer: &Customer, channel: &IntegrationChannel) -> RiskAssessment {
        let mut factors = vec![channel_complexity_factor(channel.channel_type)];
        if channel.target_endpoint.as_deref().map_or(true, str::is_empty) {
            factors.push(
                RiskFactor::new(
                    format!("INT-ENDPOINT-{}", short_id(6)),
                    RiskCategory::Integration,
                    "Target endpoint not configured",
                    75.0,
                    100.0,
                )
                .with_severity(RiskSeverity::High)
                .with_mitigation("Configure and validate target endpoint before migration"),
            );
        }
        if channel.transaction_volume > HIGH_VOLUME_THRESHOLD {
            factors.push(
                RiskFactor::new(
                    format!("VOL-HIGH-{}", short_id(6)),
                    RiskCategory::Operational,
                    format!("High transaction volume: {}/day", channel.transaction_volume),
                    70.0,
                    45.0,
                )
                .with_severity(RiskSeverity::High)
                .with_mitigation("Implement load testing and performance validation"),
            );
        }

        let overall = self.overall_score(&factors);
        let recommended_actions = channel_recommendations(channel);

        tracing::debug!(
            customer_id = %customer.customer_id,
            channel_id = %channel.channel_id,
            score = overall,
            "channel risk assessed"
        );

        build_assessment(
            format!("RISK-CH-{}", short_id(8)),
            customer,
            Some(channel.channel_id.clone()),
            factors,
            overall,
            recommended_actions,
        )
    }

    /// Category-average, weighted-sum score capped at 100; 0 with no factors
    #[must_use]
    pub fn overall_score(&self, factors: &[RiskFactor]) -> f64 {
        let mut weighted = 0.0;
        for category in RiskCategory::ALL {
            let (sum, n) = factors
                .iter()
                .filter(|f| f.category == category)
                .fold((0.0_f64, 0_usize), |(s, n), f| (s + f.risk_score(), n + 1));
            if n > 0 {
                weighted += sum / n as f64 * self.weights.weight(category);
            }
        }
        weighted.min(100.0)
    }
}

fn build_assessment(
    assessment_id: String,
    customer: &Customer,
    channel_id: Option<String>,
    risk_factors: Vec<RiskFactor>,
    overall_risk_score: f64,
    recommended_actions: Vec<String>,
) -> RiskAssessment {
    RiskAssessment {
        assessment_id,
        customer_id: customer.customer_id.clone(),
        channel_id,
        risk_factors,
        overall_risk_score,
        risk_level: RiskSeverity::from_score(overall_risk_score),
        migration_readiness_score: 100.0 - overall_risk_score,
        recommended_actions,
        assessed_at: Utc::now(),
        assessed_by: "system".to_string(),
    }
}

/// Impact/likelihood pair per criticality tier
fn criticality_scores(criticality: BusinessCriticality) -> (f64, f64) {
    match criticality {
        BusinessCriticality::Low => (10.0, 30.0),
        BusinessCriticality::Medium => (30.0, 50.0),
        BusinessCriticality::High => (60.0, 80.0),
        BusinessCriticality::Critical => (80.0, 95.0),
    }
}

fn business_criticality_factor(criticality: BusinessCriticality) -> RiskFactor {
    let (impact, likelihood) = criticality_scores(criticality);
    RiskFactor::new(
        format!("BIZ-CRIT-{}", short_id(6)),
        RiskCategory::Business,
        format!("Business criticality level: {criticality}"),
        impact,
        likelihood,
    )
    .with_mitigation("Implement parallel run and staged rollout for critical customers")
}

fn compliance_factors(customer: &Customer) -> Vec<RiskFactor> {
    customer
        .compliance_requirements
        .iter()
        .map(|requirement| {
            RiskFactor::new(
                format!("COMP-{}", short_id(6)),
                RiskCategory::Compliance,
                format!("Compliance requirement: {requirement}"),
                70.0,
                40.0,
            )
            .with_severity(RiskSeverity::High)
            .with_mitigation(format!(
                "Ensure {requirement} compliance validation in simulation phase"
            ))
        })
        .collect()
}

fn channel_mix_factors(customer: &Customer) -> Vec<RiskFactor> {
    let mut factors = Vec::new();
    let count = customer.channels.len();

    if count > MAX_CHANNELS_BEFORE_RISK {
        factors.push(
            RiskFactor::new(
                format!("CH-COUNT-{}", short_id(6)),
                RiskCategory::Integration,
                format!("High number of integration channels: {count}"),
                65.0,
                60.0,
            )
            .with_severity(RiskSeverity::High)
            .with_mitigation("Prioritize channels and migrate in phases"),
        );
    }

    if customer.channels.iter().any(|c| c.channel_type.is_legacy()) {
        factors.push(
            RiskFactor::new(
                format!("LEGACY-CH-{}", short_id(6)),
                RiskCategory::Technical,
                "Customer uses legacy channel types (EDI or thick client)",
                55.0,
                50.0,
            )
            .with_severity(RiskSeverity::Medium)
            .with_mitigation("Use channel-specific migration playbooks for legacy integrations"),
        );
    }

    factors
}

fn operational_factors(customer: &Customer) -> Vec<RiskFactor> {
    if customer.has_contact() {
        return Vec::new();
    }
    vec![RiskFactor::new(
        format!("OP-CONTACT-{}", short_id(6)),
        RiskCategory::Operational,
        "No contact information available for customer",
        40.0,
        60.0,
    )
    .with_severity(RiskSeverity::Medium)
    .with_mitigation("Establish communication channel before migration")]
}

/// Fixed impact and rationale per channel type
fn channel_complexity(channel_type: ChannelType) -> (f64, &'static str) {
    match channel_type {
        ChannelType::Edi => (70.0, "EDI migrations require protocol mapping and validation"),
        ChannelType::ThickClient => (65.0, "Thick client requires application deployment and testing"),
        ChannelType::SoapApi => (50.0, "SOAP API migration requires interface compatibility"),
        ChannelType::Sftp => (40.0, "SFTP migration requires file format validation"),
        ChannelType::WebPortal => (35.0, "Web portal migration requires UI/UX validation"),
        ChannelType::RestApi => (30.0, "REST API migration is relatively straightforward"),
    }
}

fn channel_complexity_factor(channel_type: ChannelType) -> RiskFactor {
    let (impact, description) = channel_complexity(channel_type);
    // Severity follows the raw impact, not the impact x likelihood product
    RiskFactor::new(
        format!("TECH-{}", short_id(6)),
        RiskCategory::Technical,
        description,
        impact,
        50.0,
    )
    .with_severity(RiskSeverity::from_score(impact))
    .with_mitigation("Use channel-specific playbook and thorough testing")
}

fn customer_recommendations(factors: &[RiskFactor], customer: &Customer) -> Vec<String> {
    let mut recs = Vec::new();

    if factors.iter().any(|f| f.severity.is_elevated()) {
        recs.push("Implement phased migration approach due to high-risk factors".to_string());
        recs.push("Conduct thorough simulation testing before cutover".to_string());
    }
    if !customer.compliance_requirements.is_empty() {
        recs.push("Validate compliance requirements in test environment".to_string());
    }
    if customer.channels.len() > SEQUENCING_THRESHOLD {
        recs.push("Prioritize channels by business impact and migrate sequentially".to_string());
    }
    recs.push("Establish rollback procedures for each migration phase".to_string());
    recs.push("Set up real-time monitoring during cutover period".to_string());

    recs
}

fn channel_recommendations(channel: &IntegrationChannel) -> Vec<String> {
    let mut recs = vec![
        format!("Use {} migration playbook", channel.channel_type),
        "Validate channel configuration in simulation environment".to_string(),
    ];
    if channel.transaction_volume > LOAD_TEST_THRESHOLD {
        recs.push("Conduct load testing before production cutover".to_string());
    }
    recs.push("Implement transaction logging for troubleshooting".to_string());
    recs
}

fn short_id(len: usize) -> String {
    let mut hex = uuid::Uuid::new_v4().simple().to_string();
    hex.truncate(len);
    hex.to_ascii_uppercase()
}
